use std::iter::FusedIterator;

use crate::{
    attributes::SkillAttributes,
    error::RatingError,
    model::{config::SkillConfig, object::TimedObject},
    skill::{evaluator::Evaluator, Skill},
};

/// Gradually calculate the rating of a skill axis.
///
/// After each object, [`SkillAttributes`] of all objects up to and including
/// it are yielded. After the first error the iterator is exhausted.
///
/// # Example
///
/// ```
/// use rosu_strain::{EvalFlags, Rating, SkillConfig, TimedObject};
///
/// # fn main() -> Result<(), rosu_strain::RatingError> {
/// let rating = Rating::new(SkillConfig::aim(false));
/// let objects = rating.objects((0..8).map(|i| (f64::from(i) * 150.0, ())))?;
/// let evaluator = |_: &TimedObject<()>, _: &[TimedObject<()>], _: EvalFlags| 0.5;
///
/// let mut gradual = rating.gradual(&objects, &evaluator)?;
///
/// let first = gradual.next().unwrap()?;
/// assert_eq!(first.n_objects, 1);
///
/// // Skip ahead to the last object
/// let last = gradual.last().unwrap()?;
/// assert_eq!(last.n_objects, 8);
/// # Ok(()) }
/// ```
pub struct GradualRating<'a, T, E: ?Sized> {
    skill: Skill,
    objects: &'a [TimedObject<T>],
    evaluator: &'a E,
    idx: usize,
    failed: bool,
}

impl<'a, T, E> GradualRating<'a, T, E>
where
    E: Evaluator<T> + ?Sized,
{
    pub fn new(
        config: SkillConfig,
        objects: &'a [TimedObject<T>],
        evaluator: &'a E,
    ) -> Result<Self, RatingError> {
        Ok(Self {
            skill: Skill::new(config)?,
            objects,
            evaluator,
            idx: 0,
            failed: false,
        })
    }

    fn process_next(&mut self) -> Option<Result<(), RatingError>> {
        if self.failed {
            return None;
        }

        let objects = self.objects;
        let curr = objects.get(self.idx)?;
        self.idx += 1;

        let res = self.skill.process(curr, objects, self.evaluator).map(|_| ());

        if res.is_err() {
            self.failed = true;
        }

        Some(res)
    }

    fn fail(&mut self, err: RatingError) -> Option<Result<SkillAttributes, RatingError>> {
        self.failed = true;

        Some(Err(err))
    }
}

impl<T, E> Iterator for GradualRating<'_, T, E>
where
    E: Evaluator<T> + ?Sized,
{
    type Item = Result<SkillAttributes, RatingError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Err(err) = self.process_next()? {
            return Some(Err(err));
        }

        match self.skill.cloned_attributes() {
            Ok(attrs) => Some(Ok(attrs)),
            Err(err) => self.fail(err),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();

        (len, Some(len))
    }

    // Only the requested object needs its attributes aggregated
    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        for _ in 0..n {
            if let Err(err) = self.process_next()? {
                return Some(Err(err));
            }
        }

        self.next()
    }

    fn last(mut self) -> Option<Self::Item> {
        let remaining = self.len();

        remaining.checked_sub(1).and_then(|n| self.nth(n))
    }
}

impl<T, E> ExactSizeIterator for GradualRating<'_, T, E>
where
    E: Evaluator<T> + ?Sized,
{
    fn len(&self) -> usize {
        if self.failed {
            0
        } else {
            self.objects.len() - self.idx
        }
    }
}

impl<T, E> FusedIterator for GradualRating<'_, T, E> where E: Evaluator<T> + ?Sized {}
