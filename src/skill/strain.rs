use crate::error::{InvalidInput, OverflowStage, RatingError};

/// Factor by which strain decays over `ms` milliseconds.
///
/// Negative durations are treated as zero so the factor never exceeds `1.0`.
pub fn strain_decay(ms: f64, strain_decay_base: f64) -> f64 {
    f64::powf(strain_decay_base, ms.max(0.0) / 1000.0)
}

/// Decaying integrator over per-object difficulty values.
#[derive(Clone, Debug, PartialEq)]
pub struct StrainAccumulator {
    skill_multiplier: f64,
    strain_decay_base: f64,
    current_strain: f64,
    last_start_time: Option<f64>,
}

impl StrainAccumulator {
    pub const fn new(skill_multiplier: f64, strain_decay_base: f64) -> Self {
        Self {
            skill_multiplier,
            strain_decay_base,
            current_strain: 0.0,
            last_start_time: None,
        }
    }

    /// Strain right after the most recently processed object.
    pub const fn current_strain(&self) -> f64 {
        self.current_strain
    }

    pub const fn last_start_time(&self) -> Option<f64> {
        self.last_start_time
    }

    /// Decays the current strain by `delta_time`, then adds the scaled
    /// difficulty.
    ///
    /// Returns the scaled difficulty and the new strain. The difficulty must
    /// already be validated by the caller; `idx` is only used for error
    /// reporting.
    pub fn process(
        &mut self,
        idx: usize,
        start_time: f64,
        delta_time: f64,
        raw_difficulty: f64,
    ) -> Result<(f64, f64), RatingError> {
        if self.last_start_time.is_some() {
            self.current_strain *= strain_decay(delta_time, self.strain_decay_base);
        }

        let difficulty = raw_difficulty * self.skill_multiplier;
        self.current_strain += difficulty;
        self.last_start_time = Some(start_time);

        if !self.current_strain.is_finite() {
            return Err(RatingError::overflow(OverflowStage::Strain, Some(idx)));
        }

        Ok((difficulty, self.current_strain))
    }

    /// Carry-over strain at `time` assuming no further object occurs before.
    pub fn initial_strain_at(&self, time: f64) -> Result<f64, RatingError> {
        let last_start_time = self.last_start_time.ok_or(InvalidInput::EmptyStream)?;

        Ok(self.current_strain * strain_decay(time - last_start_time, self.strain_decay_base))
    }
}
