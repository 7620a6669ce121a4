pub trait FloatExt: Sized {
    const EPS: Self;

    /// `self == other`
    fn eq(self, other: Self) -> bool;
}

impl FloatExt for f64 {
    const EPS: Self = f64::EPSILON;

    fn eq(self, other: Self) -> bool {
        (self - other).abs() < Self::EPS
    }
}
