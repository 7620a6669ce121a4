use rosu_mods::GameModsLegacy;

use crate::{
    attributes::SkillAttributes,
    error::{OverflowStage, RatingError},
    gradual::GradualRating,
    model::{
        config::{RatingCurve, SkillConfig, TopSectionReduction},
        object::{TimedObject, TimedObjects},
    },
    skill::{evaluator::Evaluator, section::SectionPeaks, Skill},
    util::{
        difficulty::{lerp, logistic},
        float_ext::FloatExt,
    },
};

/// Rating calculator of a single skill axis.
///
/// # Example
///
/// ```
/// use rosu_strain::{EvalFlags, GameModsLegacy, Rating, SkillConfig, TimedObject};
///
/// # fn main() -> Result<(), rosu_strain::RatingError> {
/// let rating = Rating::new(SkillConfig::aim(true))
///     .mods(GameModsLegacy::DoubleTime)
///     .passed_objects(2);
///
/// let objects = rating.objects([(0.0, ()), (300.0, ()), (600.0, ())])?;
/// let evaluator = |_: &TimedObject<()>, _: &[TimedObject<()>], _: EvalFlags| 1.0;
///
/// let attrs = rating.calculate(&objects, &evaluator)?;
///
/// assert_eq!(attrs.n_objects, 2);
/// # Ok(()) }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Rating {
    config: SkillConfig,
    mods: Option<GameModsLegacy>,
    clock_rate: Option<f64>,
    passed_objects: Option<u32>,
}

impl Rating {
    pub const fn new(config: SkillConfig) -> Self {
        Self {
            config,
            mods: None,
            clock_rate: None,
            passed_objects: None,
        }
    }

    /// Specify mods.
    ///
    /// Only speed-changing mods matter as they determine the clock rate.
    pub const fn mods(mut self, mods: GameModsLegacy) -> Self {
        self.mods = Some(mods);

        self
    }

    /// Adjust the clock rate used in the calculation.
    ///
    /// If none is specified, it will take the clock rate based on the mods
    /// i.e. 1.5 for DT, 0.75 for HT and 1.0 otherwise.
    pub const fn clock_rate(mut self, clock_rate: f64) -> Self {
        self.clock_rate = Some(clock_rate);

        self
    }

    /// Amount of passed objects for partial plays, e.g. a fail.
    ///
    /// If you want to calculate the rating after every few objects, instead
    /// of using [`Rating`] multiple times with different `passed_objects`,
    /// you should use [`Rating::gradual`].
    pub const fn passed_objects(mut self, passed_objects: u32) -> Self {
        self.passed_objects = Some(passed_objects);

        self
    }

    pub const fn get_config(&self) -> &SkillConfig {
        &self.config
    }

    pub fn get_clock_rate(&self) -> f64 {
        self.clock_rate
            .or_else(|| self.mods.map(|mods| mods.clock_rate()))
            .unwrap_or(1.0)
    }

    pub fn get_passed_objects(&self) -> usize {
        self.passed_objects.map_or(usize::MAX, |n| n as usize)
    }

    /// Builds the object stream from start times and payloads, applying the
    /// clock rate.
    pub fn objects<T>(
        &self,
        items: impl IntoIterator<Item = (f64, T)>,
    ) -> Result<TimedObjects<T>, RatingError> {
        TimedObjects::with_clock_rate(items, self.get_clock_rate())
    }

    /// Builds the object stream from the hit objects of a parsed beatmap,
    /// applying the clock rate.
    pub fn map_objects<'a>(
        &self,
        map: &'a rosu_map::Beatmap,
    ) -> Result<TimedObjects<&'a rosu_map::section::hit_objects::HitObject>, RatingError> {
        TimedObjects::from_map(map, self.get_clock_rate())
    }

    /// Calculates the rating of the passed objects.
    pub fn calculate<T, E>(
        &self,
        objects: &[TimedObject<T>],
        evaluator: &E,
    ) -> Result<SkillAttributes, RatingError>
    where
        E: Evaluator<T> + ?Sized,
    {
        log_event!(debug: n_objects = objects.len(), clock_rate = self.get_clock_rate(), "calculating rating");

        let attrs = self.process(objects, evaluator)?.into_attributes()?;

        log_event!(debug: rating = attrs.rating, consistency = attrs.consistency, "rating calculated");

        Ok(attrs)
    }

    /// Chronological section peaks of the passed objects.
    ///
    /// Suitable to plot the difficulty over time.
    pub fn strains<T, E>(
        &self,
        objects: &[TimedObject<T>],
        evaluator: &E,
    ) -> Result<Strains, RatingError>
    where
        E: Evaluator<T> + ?Sized,
    {
        let peaks = self.process(objects, evaluator)?.into_section_peaks();

        Ok(Strains {
            section_len: self.config.section_len,
            peaks: peaks.into_vec(),
        })
    }

    /// Iterator over the attributes after each passed object.
    pub fn gradual<'a, T, E>(
        &self,
        objects: &'a [TimedObject<T>],
        evaluator: &'a E,
    ) -> Result<GradualRating<'a, T, E>, RatingError>
    where
        E: Evaluator<T> + ?Sized,
    {
        let objects = &objects[..objects.len().min(self.get_passed_objects())];

        GradualRating::new(self.config.clone(), objects, evaluator)
    }

    fn process<T, E>(&self, objects: &[TimedObject<T>], evaluator: &E) -> Result<Skill, RatingError>
    where
        E: Evaluator<T> + ?Sized,
    {
        let mut skill = Skill::new(self.config.clone())?;
        let objects = &objects[..objects.len().min(self.get_passed_objects())];

        for curr in objects {
            skill.process(curr, objects, evaluator)?;
        }

        Ok(skill)
    }
}

/// The section peaks of a calculation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Strains {
    /// Time in milliseconds between two peaks.
    pub section_len: f64,
    /// Peak strain of each section in chronological order.
    pub peaks: Vec<f64>,
}

impl Strains {
    /// Amount of sections.
    pub fn len(&self) -> usize {
        self.peaks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peaks.is_empty()
    }
}

/// Weighted sum of the section peaks.
///
/// The highest peaks are optionally reduced, then all peaks are weighted by
/// `decay_weight^rank` in descending order.
pub(crate) fn difficulty_value(
    peaks: &SectionPeaks,
    config: &SkillConfig,
) -> Result<f64, RatingError> {
    let mut peaks = peaks.sorted_desc();

    if let Some(TopSectionReduction {
        section_count,
        baseline,
    }) = config.reduction
    {
        // Zeros are sorted last and skipped here
        let peaks_iter = peaks
            .iter_mut()
            .take_while(|strain| **strain > 0.0)
            .take(section_count);

        for (i, strain) in peaks_iter.enumerate() {
            let clamped = f64::from((i as f32 / section_count as f32).clamp(0.0, 1.0));
            let scale = f64::log10(lerp(1.0, 10.0, clamped));
            *strain *= lerp(baseline, 1.0, scale);
        }

        peaks.sort_by(|a, b| b.total_cmp(a));
    }

    let mut difficulty = 0.0;
    let mut weight = 1.0;

    for strain in peaks {
        difficulty += strain * weight;
        weight *= config.decay_weight;
    }

    let difficulty = difficulty * config.difficulty_multiplier;

    if difficulty.is_finite() {
        Ok(difficulty)
    } else {
        Err(RatingError::overflow(OverflowStage::DifficultyValue, None))
    }
}

pub(crate) fn rating_of(difficulty_value: f64, curve: RatingCurve) -> Result<f64, RatingError> {
    let rating = curve.apply(difficulty_value);

    if rating.is_finite() {
        Ok(rating)
    } else {
        Err(RatingError::overflow(OverflowStage::Rating, None))
    }
}

pub(crate) fn count_top_weighted_strains(object_strains: &[f64], difficulty_value: f64) -> f64 {
    if object_strains.is_empty() {
        return 0.0;
    }

    // What would the top strain be if all strain values were identical
    let consistent_top_strain = difficulty_value / 10.0;

    if FloatExt::eq(consistent_top_strain, 0.0) {
        return object_strains.len() as f64;
    }

    object_strains
        .iter()
        .map(|s| logistic(*s / consistent_top_strain, 0.88, 10.0, Some(1.1)))
        .sum()
}
