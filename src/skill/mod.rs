//! The stateful parts of a rating calculation.

use crate::{
    attributes::SkillAttributes,
    error::{InvalidInput, RatingError},
    model::{config::SkillConfig, object::TimedObject},
    rating::{count_top_weighted_strains, difficulty_value, rating_of},
};

use self::{
    consistency::ConsistencyAccumulator,
    evaluator::Evaluator,
    section::{SectionPeaks, SectionTracker},
    strain::StrainAccumulator,
};

pub mod consistency;
pub mod evaluator;
pub mod section;
pub mod strain;

/// A single skill axis being processed object by object.
///
/// Objects must be passed to [`Skill::process`] in order and each exactly
/// once.
#[derive(Clone, Debug)]
pub struct Skill {
    config: SkillConfig,
    strain: StrainAccumulator,
    sections: SectionTracker,
    consistency: ConsistencyAccumulator,
    object_strains: Vec<f64>,
}

impl Skill {
    /// Validates the config and sets up a fresh skill.
    pub fn new(config: SkillConfig) -> Result<Self, RatingError> {
        config.validate()?;

        Ok(Self {
            strain: StrainAccumulator::new(config.skill_multiplier, config.strain_decay_base),
            sections: SectionTracker::new(config.section_len, config.skip_initial_sections),
            consistency: ConsistencyAccumulator::new(),
            // mean=406.72 | median=307
            object_strains: Vec::with_capacity(256),
            config,
        })
    }

    pub const fn config(&self) -> &SkillConfig {
        &self.config
    }

    /// Strain of every processed object.
    pub fn object_strains(&self) -> &[f64] {
        &self.object_strains
    }

    pub const fn consistency(&self) -> &ConsistencyAccumulator {
        &self.consistency
    }

    /// Processes the next object and returns its strain.
    ///
    /// The object's timing is checked against the previously processed
    /// object so that hand-built objects obey the same rules as a
    /// [`TimedObjects`](crate::TimedObjects) stream.
    pub fn process<T, E>(
        &mut self,
        curr: &TimedObject<T>,
        objects: &[TimedObject<T>],
        evaluator: &E,
    ) -> Result<f64, RatingError>
    where
        E: Evaluator<T> + ?Sized,
    {
        self.check_timing(curr)?;
        self.sections.advance_to(curr.start_time, &self.strain)?;

        let strain = self.strain_value_at(curr, objects, evaluator)?;
        self.sections.record(strain);
        self.object_strains.push(strain);

        Ok(strain)
    }

    fn check_timing<T>(&self, curr: &TimedObject<T>) -> Result<(), InvalidInput> {
        let TimedObject {
            idx,
            start_time,
            delta_time,
            ..
        } = *curr;

        if !start_time.is_finite() {
            return Err(InvalidInput::NonFiniteStartTime { idx });
        }

        if let Some(prev_start_time) = self
            .strain
            .last_start_time()
            .filter(|prev| start_time < *prev)
        {
            return Err(InvalidInput::NonMonotonicStartTime {
                idx,
                start_time,
                prev_start_time,
            });
        }

        if !(delta_time.is_finite() && delta_time >= 0.0) {
            return Err(InvalidInput::NegativeDeltaTime { idx, delta_time });
        }

        let expected = self.object_strains.len();

        if idx != expected {
            return Err(InvalidInput::IndexMismatch { idx, expected });
        }

        Ok(())
    }

    fn strain_value_at<T, E>(
        &mut self,
        curr: &TimedObject<T>,
        objects: &[TimedObject<T>],
        evaluator: &E,
    ) -> Result<f64, RatingError>
    where
        E: Evaluator<T> + ?Sized,
    {
        let raw = evaluator.evaluate_diff_of(curr, objects, self.config.flags);

        if !(raw.is_finite() && raw >= 0.0) {
            log_event!(warn: idx = curr.idx, value = raw, "evaluator contract violated");

            return Err(RatingError::EvaluatorContractViolation {
                idx: curr.idx,
                value: raw,
            });
        }

        let (difficulty, strain) =
            self.strain
                .process(curr.idx, curr.start_time, curr.delta_time, raw)?;

        self.consistency.add(difficulty);

        Ok(strain)
    }

    /// Chronological section peaks, consuming the skill.
    pub fn into_section_peaks(self) -> SectionPeaks {
        self.sections.into_peaks()
    }

    /// Section peaks without consuming the skill.
    pub fn cloned_section_peaks(&self) -> SectionPeaks {
        self.sections.clone().into_peaks()
    }

    /// Aggregates the processed objects into attributes, consuming the skill.
    pub fn into_attributes(self) -> Result<SkillAttributes, RatingError> {
        let Self {
            config,
            strain: _,
            sections,
            consistency,
            object_strains,
        } = self;

        let peaks = sections.into_peaks();
        let difficulty_value = difficulty_value(&peaks, &config)?;
        let rating = rating_of(difficulty_value, config.curve)?;

        let consistency_stats = consistency.stats();
        let consistency = consistency.finalize(
            config.consistency_reference,
            config.consistency_normalization,
        )?;

        Ok(SkillAttributes {
            rating,
            consistency,
            difficulty_value,
            difficult_strain_count: count_top_weighted_strains(&object_strains, difficulty_value),
            consistency_stats,
            n_objects: object_strains.len(),
            n_sections: peaks.len(),
        })
    }

    /// Aggregates the processed objects into attributes without consuming
    /// the skill.
    pub fn cloned_attributes(&self) -> Result<SkillAttributes, RatingError> {
        self.clone().into_attributes()
    }
}
