use crate::{
    error::RatingError,
    skill::consistency::ConsistencyStats,
    util::difficulty::normal_cdf,
};

/// Flags passed along to the [`Evaluator`] for every object.
///
/// [`Evaluator`]: crate::Evaluator
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct EvalFlags {
    /// Whether slider paths contribute to the difficulty.
    pub include_sliders: bool,
}

/// Dampens the highest section peaks so that a single hard section can't
/// dominate the rating.
///
/// The `i`-th highest peak is multiplied by
/// `lerp(baseline, 1, log10(lerp(1, 10, i / section_count)))` for each
/// `i < section_count`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TopSectionReduction {
    pub section_count: usize,
    pub baseline: f64,
}

impl Default for TopSectionReduction {
    fn default() -> Self {
        Self {
            section_count: 10,
            baseline: 0.75,
        }
    }
}

/// Maps the weighted sum of section peaks onto the public rating unit.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RatingCurve {
    /// `x * multiplier`
    Linear { multiplier: f64 },
    /// `sqrt(x) * multiplier`
    Sqrt { multiplier: f64 },
    /// `x^exponent * multiplier`
    Power { exponent: f64, multiplier: f64 },
}

impl RatingCurve {
    pub fn apply(self, difficulty_value: f64) -> f64 {
        match self {
            Self::Linear { multiplier } => difficulty_value * multiplier,
            Self::Sqrt { multiplier } => difficulty_value.sqrt() * multiplier,
            Self::Power {
                exponent,
                multiplier,
            } => difficulty_value.powf(exponent) * multiplier,
        }
    }
}

impl Default for RatingCurve {
    fn default() -> Self {
        Self::Linear { multiplier: 1.0 }
    }
}

/// Population mean and standard deviation of the consistency statistic.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ConsistencyReference {
    pub mean: f64,
    pub stdev: f64,
}

/// How [`ConsistencyStats`] are turned into a consistency score.
#[derive(Copy, Clone, Debug, Default)]
pub enum ConsistencyNormalization {
    /// Percentile of the coefficient of variation (`stdev / mean`) within the
    /// reference population, inverted so that more uniform difficulty scores
    /// higher.
    ///
    /// Bounded to `[0, 1]`.
    #[default]
    Percentile,
    /// `stdev / reference.stdev`, bounded to `[0, max]`.
    StdevRatio { max: f64 },
    /// Caller supplied transform. Its result must be finite.
    Custom(fn(ConsistencyStats, ConsistencyReference) -> f64),
}

impl ConsistencyNormalization {
    pub fn apply(self, stats: ConsistencyStats, reference: ConsistencyReference) -> f64 {
        if stats.count == 0 && !matches!(self, Self::Custom(_)) {
            return 0.0;
        }

        match self {
            Self::Percentile => {
                let variation = stats.coefficient_of_variation();

                normal_cdf((reference.mean - variation) / reference.stdev)
            }
            Self::StdevRatio { max } => (stats.stdev / reference.stdev).clamp(0.0, max),
            Self::Custom(f) => f(stats, reference),
        }
    }

    /// Inclusive range of the score, `None` for custom transforms.
    pub fn bounds(self) -> Option<(f64, f64)> {
        match self {
            Self::Percentile => Some((0.0, 1.0)),
            Self::StdevRatio { max } => Some((0.0, max)),
            Self::Custom(_) => None,
        }
    }
}

impl PartialEq for ConsistencyNormalization {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Percentile, Self::Percentile) => true,
            (Self::StdevRatio { max: a }, Self::StdevRatio { max: b }) => a == b,
            (Self::Custom(a), Self::Custom(b)) => std::ptr::fn_addr_eq(*a, *b),
            _ => false,
        }
    }
}

/// Tuning constants of a single skill axis.
///
/// Use a preset such as [`SkillConfig::aim`] or start from
/// [`SkillConfig::new`] and adjust via the builder methods.
///
/// # Example
///
/// ```
/// use rosu_strain::{RatingCurve, SkillConfig, TopSectionReduction};
///
/// let config = SkillConfig::new(1.47, 0.3)
///     .section_len(400.0)
///     .reduction(TopSectionReduction { section_count: 5, baseline: 0.75 })
///     .curve(RatingCurve::Sqrt { multiplier: 0.0675 });
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SkillConfig {
    pub skill_multiplier: f64,
    pub strain_decay_base: f64,
    pub section_len: f64,
    pub skip_initial_sections: usize,
    pub decay_weight: f64,
    pub difficulty_multiplier: f64,
    pub reduction: Option<TopSectionReduction>,
    pub curve: RatingCurve,
    pub consistency_reference: ConsistencyReference,
    pub consistency_normalization: ConsistencyNormalization,
    pub flags: EvalFlags,
}

impl SkillConfig {
    pub const DEFAULT_SECTION_LEN: f64 = 400.0;
    pub const DEFAULT_DECAY_WEIGHT: f64 = 0.9;

    /// Plain configuration without top-section reduction and with a linear
    /// curve.
    pub const fn new(skill_multiplier: f64, strain_decay_base: f64) -> Self {
        Self {
            skill_multiplier,
            strain_decay_base,
            section_len: Self::DEFAULT_SECTION_LEN,
            skip_initial_sections: 0,
            decay_weight: Self::DEFAULT_DECAY_WEIGHT,
            difficulty_multiplier: 1.0,
            reduction: None,
            curve: RatingCurve::Linear { multiplier: 1.0 },
            consistency_reference: ConsistencyReference {
                mean: 0.0,
                stdev: 1.0,
            },
            consistency_normalization: ConsistencyNormalization::Percentile,
            flags: EvalFlags {
                include_sliders: false,
            },
        }
    }

    /// Constants of the aim skill.
    pub const fn aim(include_sliders: bool) -> Self {
        const SKILL_MULTIPLIER: f64 = 23.55;
        const STRAIN_DECAY_BASE: f64 = 0.15;
        const DIFFICULTY_MULTIPLIER: f64 = 1.06;
        const RATING_MULTIPLIER: f64 = 0.0675;

        let consistency_reference = if include_sliders {
            ConsistencyReference {
                mean: 0.3351283539,
                stdev: 0.07727181531,
            }
        } else {
            ConsistencyReference {
                mean: 0.31709432,
                stdev: 0.06992028354,
            }
        };

        Self {
            difficulty_multiplier: DIFFICULTY_MULTIPLIER,
            reduction: Some(TopSectionReduction {
                section_count: 10,
                baseline: 0.75,
            }),
            curve: RatingCurve::Sqrt {
                multiplier: RATING_MULTIPLIER,
            },
            consistency_reference,
            flags: EvalFlags { include_sliders },
            ..Self::new(SKILL_MULTIPLIER, STRAIN_DECAY_BASE)
        }
    }

    pub const fn skill_multiplier(mut self, skill_multiplier: f64) -> Self {
        self.skill_multiplier = skill_multiplier;

        self
    }

    pub const fn strain_decay_base(mut self, strain_decay_base: f64) -> Self {
        self.strain_decay_base = strain_decay_base;

        self
    }

    pub const fn section_len(mut self, section_len: f64) -> Self {
        self.section_len = section_len;

        self
    }

    /// Amount of leading sections whose peaks are not recorded.
    ///
    /// Strain still accumulates throughout those sections.
    pub const fn skip_initial_sections(mut self, skip: usize) -> Self {
        self.skip_initial_sections = skip;

        self
    }

    pub const fn decay_weight(mut self, decay_weight: f64) -> Self {
        self.decay_weight = decay_weight;

        self
    }

    pub const fn difficulty_multiplier(mut self, difficulty_multiplier: f64) -> Self {
        self.difficulty_multiplier = difficulty_multiplier;

        self
    }

    pub const fn reduction(mut self, reduction: TopSectionReduction) -> Self {
        self.reduction = Some(reduction);

        self
    }

    pub const fn no_reduction(mut self) -> Self {
        self.reduction = None;

        self
    }

    pub const fn curve(mut self, curve: RatingCurve) -> Self {
        self.curve = curve;

        self
    }

    pub const fn consistency_reference(mut self, mean: f64, stdev: f64) -> Self {
        self.consistency_reference = ConsistencyReference { mean, stdev };

        self
    }

    pub const fn consistency_normalization(
        mut self,
        normalization: ConsistencyNormalization,
    ) -> Self {
        self.consistency_normalization = normalization;

        self
    }

    pub const fn include_sliders(mut self, include_sliders: bool) -> Self {
        self.flags.include_sliders = include_sliders;

        self
    }

    /// Checks that all constants are within their meaningful range.
    pub fn validate(&self) -> Result<(), RatingError> {
        fn check(field: &'static str, value: f64, valid: bool) -> Result<(), RatingError> {
            if valid && value.is_finite() {
                Ok(())
            } else {
                Err(RatingError::InvalidConfig { field, value })
            }
        }

        let Self {
            skill_multiplier,
            strain_decay_base,
            section_len,
            skip_initial_sections: _,
            decay_weight,
            difficulty_multiplier,
            reduction,
            curve,
            consistency_reference,
            consistency_normalization,
            flags: _,
        } = self;

        check("skill_multiplier", *skill_multiplier, *skill_multiplier >= 0.0)?;
        check(
            "strain_decay_base",
            *strain_decay_base,
            *strain_decay_base > 0.0 && *strain_decay_base < 1.0,
        )?;
        check("section_len", *section_len, *section_len > 0.0)?;
        check(
            "decay_weight",
            *decay_weight,
            *decay_weight > 0.0 && *decay_weight <= 1.0,
        )?;
        check(
            "difficulty_multiplier",
            *difficulty_multiplier,
            *difficulty_multiplier >= 0.0,
        )?;

        if let Some(TopSectionReduction {
            section_count,
            baseline,
        }) = reduction
        {
            check(
                "reduction.section_count",
                *section_count as f64,
                *section_count > 0,
            )?;
            check(
                "reduction.baseline",
                *baseline,
                *baseline > 0.0 && *baseline <= 1.0,
            )?;
        }

        match curve {
            RatingCurve::Linear { multiplier } | RatingCurve::Sqrt { multiplier } => {
                check("curve.multiplier", *multiplier, *multiplier >= 0.0)?;
            }
            RatingCurve::Power {
                exponent,
                multiplier,
            } => {
                check("curve.exponent", *exponent, *exponent > 0.0)?;
                check("curve.multiplier", *multiplier, *multiplier >= 0.0)?;
            }
        }

        check(
            "consistency_reference.mean",
            consistency_reference.mean,
            true,
        )?;
        check(
            "consistency_reference.stdev",
            consistency_reference.stdev,
            consistency_reference.stdev > 0.0,
        )?;

        if let ConsistencyNormalization::StdevRatio { max } = consistency_normalization {
            check("consistency_normalization.max", *max, *max >= 0.0)?;
        }

        Ok(())
    }
}

impl Default for SkillConfig {
    fn default() -> Self {
        Self::aim(true)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn aim_presets_differ_in_reference() {
        let with_sliders = SkillConfig::aim(true);
        let without_sliders = SkillConfig::aim(false);

        assert!(with_sliders.flags.include_sliders);
        assert!(!without_sliders.flags.include_sliders);
        assert_abs_diff_eq!(with_sliders.consistency_reference.mean, 0.3351283539);
        assert_abs_diff_eq!(without_sliders.consistency_reference.stdev, 0.06992028354);
        assert!(with_sliders.validate().is_ok());
        assert!(without_sliders.validate().is_ok());
    }

    #[test]
    fn rejects_decay_base_outside_unit_interval() {
        for base in [0.0, 1.0, 1.5, -0.2, f64::NAN] {
            let err = SkillConfig::aim(true)
                .strain_decay_base(base)
                .validate()
                .unwrap_err();

            assert!(matches!(
                err,
                RatingError::InvalidConfig {
                    field: "strain_decay_base",
                    ..
                }
            ));
        }
    }

    #[test]
    fn rejects_zero_reduction_sections() {
        let config = SkillConfig::new(1.0, 0.5).reduction(TopSectionReduction {
            section_count: 0,
            baseline: 0.75,
        });

        assert!(config.validate().is_err());
    }

    #[test]
    fn curves() {
        assert_abs_diff_eq!(RatingCurve::Linear { multiplier: 2.0 }.apply(3.0), 6.0);
        assert_abs_diff_eq!(RatingCurve::Sqrt { multiplier: 0.5 }.apply(16.0), 2.0);
        assert_abs_diff_eq!(
            RatingCurve::Power {
                exponent: 3.0,
                multiplier: 1.0
            }
            .apply(2.0),
            8.0
        );
    }

    #[test]
    fn empty_stats_normalize_to_zero() {
        let reference = ConsistencyReference {
            mean: 0.3,
            stdev: 0.07,
        };

        let stats = ConsistencyStats::default();

        assert_abs_diff_eq!(ConsistencyNormalization::Percentile.apply(stats, reference), 0.0);
        assert_abs_diff_eq!(
            ConsistencyNormalization::StdevRatio { max: 3.0 }.apply(stats, reference),
            0.0
        );
    }
}
