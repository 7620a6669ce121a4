use crate::model::{config::EvalFlags, object::TimedObject};

/// Assigns a raw difficulty to each object of a skill axis.
///
/// Implementations must be pure and total: the returned value has to be
/// finite and non-negative for every object, including the first one for
/// which [`TimedObject::previous`] yields `None`. Violations abort the
/// calculation with [`RatingError::EvaluatorContractViolation`].
///
/// Any `Fn(&TimedObject<T>, &[TimedObject<T>], EvalFlags) -> f64` is an
/// evaluator.
///
/// [`RatingError::EvaluatorContractViolation`]: crate::RatingError::EvaluatorContractViolation
pub trait Evaluator<T> {
    fn evaluate_diff_of(
        &self,
        curr: &TimedObject<T>,
        objects: &[TimedObject<T>],
        flags: EvalFlags,
    ) -> f64;
}

impl<T, F> Evaluator<T> for F
where
    F: Fn(&TimedObject<T>, &[TimedObject<T>], EvalFlags) -> f64,
{
    fn evaluate_diff_of(
        &self,
        curr: &TimedObject<T>,
        objects: &[TimedObject<T>],
        flags: EvalFlags,
    ) -> f64 {
        self(curr, objects, flags)
    }
}
