use std::fmt::{Display, Formatter, Result as FmtResult};

use thiserror::Error;

/// All the ways a rating calculation can fail.
///
/// Errors are never recovered from internally; the calculation is
/// deterministic so retrying would reproduce the same failure.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum RatingError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),
    #[error("invalid configuration: `{field}` cannot be {value}")]
    InvalidConfig { field: &'static str, value: f64 },
    /// The evaluator returned a negative or non-finite value.
    #[error("evaluator returned {value} for object {idx}; expected a finite non-negative value")]
    EvaluatorContractViolation { idx: usize, value: f64 },
    /// A value left the representable range.
    #[error("numeric overflow while computing the {stage}{}", OptionalIdx(*.idx))]
    NumericOverflow {
        stage: OverflowStage,
        idx: Option<usize>,
    },
}

impl RatingError {
    pub(crate) const fn overflow(stage: OverflowStage, idx: Option<usize>) -> Self {
        Self::NumericOverflow { stage, idx }
    }
}

/// Malformed object stream or calculation parameters.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum InvalidInput {
    #[error("object {idx} starts at {start_time} which is before its predecessor at {prev_start_time}")]
    NonMonotonicStartTime {
        idx: usize,
        start_time: f64,
        prev_start_time: f64,
    },
    #[error("object {idx} has a non-finite start time")]
    NonFiniteStartTime { idx: usize },
    #[error("object {idx} has delta time {delta_time}; must be finite and non-negative")]
    NegativeDeltaTime { idx: usize, delta_time: f64 },
    #[error("object at position {expected} has index {idx}")]
    IndexMismatch { idx: usize, expected: usize },
    #[error("operation requires at least one processed object")]
    EmptyStream,
    #[error("clock rate must be finite and positive, got {0}")]
    InvalidClockRate(f64),
}

/// The computation step during which a [`RatingError::NumericOverflow`]
/// occurred.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OverflowStage {
    Strain,
    DifficultyValue,
    Rating,
    Consistency,
}

impl Display for OverflowStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let s = match self {
            Self::Strain => "strain",
            Self::DifficultyValue => "difficulty value",
            Self::Rating => "rating",
            Self::Consistency => "consistency score",
        };

        f.write_str(s)
    }
}

struct OptionalIdx(Option<usize>);

impl Display for OptionalIdx {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self.0 {
            Some(idx) => write!(f, " of object {idx}"),
            None => Ok(()),
        }
    }
}
