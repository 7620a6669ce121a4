use crate::{
    error::{OverflowStage, RatingError},
    model::config::{ConsistencyNormalization, ConsistencyReference},
};

/// Mean and standard deviation of the difficulty values seen so far.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ConsistencyStats {
    pub count: usize,
    pub mean: f64,
    /// Population standard deviation.
    pub stdev: f64,
}

impl ConsistencyStats {
    /// `stdev / mean`, or `0.0` if the mean is zero.
    pub fn coefficient_of_variation(&self) -> f64 {
        if self.mean > 0.0 {
            self.stdev / self.mean
        } else {
            0.0
        }
    }
}

/// Streaming mean and variance via Welford's algorithm.
///
/// Accumulation is order-independent up to floating point error so disjoint
/// ranges can be accumulated separately and [merged](Self::merge).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConsistencyAccumulator {
    count: usize,
    mean: f64,
    sum_squared_deviation: f64,
}

impl ConsistencyAccumulator {
    pub const fn new() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            sum_squared_deviation: 0.0,
        }
    }

    pub fn add(&mut self, value: f64) {
        self.count += 1;

        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.sum_squared_deviation += delta * (value - self.mean);
    }

    /// Combines the values of `other` into `self`.
    pub fn merge(&mut self, other: &Self) {
        if other.count == 0 {
            return;
        }

        if self.count == 0 {
            *self = other.clone();

            return;
        }

        let count = self.count + other.count;
        let delta = other.mean - self.mean;
        let (n_self, n_other, n) = (self.count as f64, other.count as f64, count as f64);

        self.mean += delta * n_other / n;
        self.sum_squared_deviation +=
            other.sum_squared_deviation + delta * delta * n_self * n_other / n;
        self.count = count;
    }

    pub const fn count(&self) -> usize {
        self.count
    }

    pub fn variance(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            // Rounding may push tiny deviations below zero
            (self.sum_squared_deviation / self.count as f64).max(0.0)
        }
    }

    pub fn stats(&self) -> ConsistencyStats {
        ConsistencyStats {
            count: self.count,
            mean: self.mean,
            stdev: self.variance().sqrt(),
        }
    }

    /// Normalizes the statistics into a consistency score.
    ///
    /// Fails if the mean or standard deviation left the representable range.
    pub fn finalize(
        &self,
        reference: ConsistencyReference,
        normalization: ConsistencyNormalization,
    ) -> Result<f64, RatingError> {
        let stats = self.stats();

        if !(stats.mean.is_finite() && stats.stdev.is_finite()) {
            return Err(RatingError::overflow(OverflowStage::Consistency, None));
        }

        let score = normalization.apply(stats, reference);

        if score.is_finite() {
            Ok(score)
        } else {
            Err(RatingError::overflow(OverflowStage::Consistency, None))
        }
    }
}

impl Extend<f64> for ConsistencyAccumulator {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl FromIterator<f64> for ConsistencyAccumulator {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut accumulator = Self::new();
        accumulator.extend(iter);

        accumulator
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    use super::*;

    const REFERENCE: ConsistencyReference = ConsistencyReference {
        mean: 0.3351283539,
        stdev: 0.07727181531,
    };

    #[test]
    fn welford_matches_two_pass() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let stats = values.iter().copied().collect::<ConsistencyAccumulator>().stats();

        assert_eq!(stats.count, 8);
        assert_abs_diff_eq!(stats.mean, 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(stats.stdev, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn empty_is_zero() {
        let accumulator = ConsistencyAccumulator::new();

        assert_eq!(accumulator.stats(), ConsistencyStats::default());
        assert_abs_diff_eq!(
            accumulator
                .finalize(REFERENCE, ConsistencyNormalization::Percentile)
                .unwrap(),
            0.0
        );
    }

    #[test]
    fn uniform_difficulty_is_consistent() {
        let uniform: ConsistencyAccumulator = std::iter::repeat(20.0).take(50).collect();
        let erratic: ConsistencyAccumulator = (0..50)
            .map(|i| if i % 5 == 0 { 60.0 } else { 2.0 })
            .collect();

        let uniform = uniform
            .finalize(REFERENCE, ConsistencyNormalization::Percentile)
            .unwrap();
        let erratic = erratic
            .finalize(REFERENCE, ConsistencyNormalization::Percentile)
            .unwrap();

        assert!(uniform > 0.99, "{uniform}");
        assert!(erratic < 0.01, "{erratic}");
    }

    #[test]
    fn custom_normalization_must_be_finite() {
        let accumulator: ConsistencyAccumulator = [1.0, 2.0].into_iter().collect();
        let nan = ConsistencyNormalization::Custom(|_, _| f64::NAN);

        assert_eq!(
            accumulator.finalize(REFERENCE, nan),
            Err(RatingError::overflow(OverflowStage::Consistency, None))
        );

        let mean = ConsistencyNormalization::Custom(|stats, _| stats.mean);
        assert_abs_diff_eq!(accumulator.finalize(REFERENCE, mean).unwrap(), 1.5);
    }

    #[test]
    fn overflowing_deviation_fails() {
        let accumulator: ConsistencyAccumulator = [1e200, 0.0, 1e200].into_iter().collect();
        assert!(accumulator.stats().stdev.is_infinite());

        for normalization in [
            ConsistencyNormalization::Percentile,
            ConsistencyNormalization::StdevRatio { max: 5.0 },
        ] {
            assert_eq!(
                accumulator.finalize(REFERENCE, normalization),
                Err(RatingError::overflow(OverflowStage::Consistency, None))
            );
        }
    }

    proptest! {
        #[test]
        fn merge_equals_sequential(
            values in prop::collection::vec(0.0..1000.0_f64, 0..200),
            split in 0..200_usize,
        ) {
            let split = split.min(values.len());
            let (left, right) = values.split_at(split);

            let sequential: ConsistencyAccumulator = values.iter().copied().collect();
            let mut merged: ConsistencyAccumulator = left.iter().copied().collect();
            merged.merge(&right.iter().copied().collect());

            let (expected, actual) = (sequential.stats(), merged.stats());

            prop_assert_eq!(expected.count, actual.count);
            prop_assert!((expected.mean - actual.mean).abs() <= 1e-9 * expected.mean.max(1.0));
            prop_assert!((expected.stdev - actual.stdev).abs() <= 1e-6 * expected.stdev.max(1.0));
        }

        #[test]
        fn scores_stay_in_bounds(values in prop::collection::vec(0.0..1e6_f64, 0..100)) {
            let accumulator: ConsistencyAccumulator = values.into_iter().collect();

            for normalization in [
                ConsistencyNormalization::Percentile,
                ConsistencyNormalization::StdevRatio { max: 5.0 },
            ] {
                let (min, max) = normalization.bounds().unwrap();
                let score = accumulator.finalize(REFERENCE, normalization).unwrap();

                prop_assert!((min..=max).contains(&score));
            }
        }
    }
}
