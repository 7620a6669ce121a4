use std::f64::consts::SQRT_2;

use crate::util::float_ext::FloatExt;

pub const fn lerp(start: f64, end: f64, amount: f64) -> f64 {
    start + (end - start) * amount
}

// `f64::exp` is not const
pub fn logistic(x: f64, midpoint_offset: f64, multiplier: f64, max_value: Option<f64>) -> f64 {
    max_value.unwrap_or(1.0) / (1.0 + f64::exp(multiplier * (midpoint_offset - x)))
}

pub fn erf(x: f64) -> f64 {
    #![expect(clippy::unreadable_literal, reason = "Abramowitz and Stegun constants")]

    if FloatExt::eq(x, 0.0) {
        return 0.0;
    }

    if x.is_infinite() {
        return x.signum();
    }

    if x.is_nan() {
        return f64::NAN;
    }

    // Abramowitz and Stegun formula 7.1.26
    let t = 1.0 / (1.0 + 0.3275911 * f64::abs(x));

    let tau = t
        * (0.254829592
            + t * (-0.284496736 + t * (1.421413741 + t * (-1.453152027 + t * 1.061405429))));

    let erf = 1.0 - tau * f64::exp(-x * x);

    if x >= 0.0 { erf } else { -erf }
}

/// Cumulative distribution function of the standard normal distribution.
pub fn normal_cdf(z: f64) -> f64 {
    (0.5 * (1.0 + erf(z / SQRT_2))).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn erf_known_values() {
        assert_abs_diff_eq!(erf(0.0), 0.0);
        assert_abs_diff_eq!(erf(1.0), 0.842_700_79, epsilon = 1e-6);
        assert_abs_diff_eq!(erf(-1.0), -0.842_700_79, epsilon = 1e-6);
        assert_abs_diff_eq!(erf(f64::INFINITY), 1.0);
        assert_abs_diff_eq!(erf(f64::NEG_INFINITY), -1.0);
        assert!(erf(f64::NAN).is_nan());
    }

    #[test]
    fn normal_cdf_is_symmetric() {
        assert_abs_diff_eq!(normal_cdf(0.0), 0.5);
        assert_abs_diff_eq!(normal_cdf(1.5) + normal_cdf(-1.5), 1.0, epsilon = 1e-9);
        assert!(normal_cdf(40.0) <= 1.0);
        assert!(normal_cdf(-40.0) >= 0.0);
    }

    #[test]
    fn logistic_midpoint() {
        assert_abs_diff_eq!(logistic(0.88, 0.88, 10.0, Some(1.1)), 0.55);
    }
}
