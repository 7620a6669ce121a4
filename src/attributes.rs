use crate::skill::consistency::ConsistencyStats;

/// The result of rating a skill axis.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SkillAttributes {
    /// The final rating.
    pub rating: f64,
    /// Uniformity of difficulty throughout the objects, bounded by the
    /// configured [`ConsistencyNormalization`](crate::ConsistencyNormalization).
    pub consistency: f64,
    /// Weighted sum of section peaks before the rating curve was applied.
    pub difficulty_value: f64,
    /// Weighted count of objects whose strain is close to the top strain.
    pub difficult_strain_count: f64,
    /// Mean and standard deviation of the scaled difficulty values.
    pub consistency_stats: ConsistencyStats,
    /// The amount of processed objects.
    pub n_objects: usize,
    /// The amount of recorded sections.
    pub n_sections: usize,
}
