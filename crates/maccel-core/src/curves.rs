//! The two supported sensitivity curve families.
//!
//! Each family maps an input speed above its offset to a raw sensitivity
//! delta; turning that delta into a gain is left to
//! [`sensitivity`](crate::sensitivity).

use crate::fixed::{Arith, FixedPoint, Result};

pub mod classic;
pub mod linear;

pub use classic::ClassicCurve;
pub use linear::LinearCurve;

/// Curve family selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CurveMode {
    /// Quadratic growth: `accel * (speed - offset)^2 / speed`.
    #[default]
    Linear,
    /// Arbitrary exponent: `(accel * (speed - offset))^power / speed`.
    Classic,
}

impl CurveMode {
    /// Parse mode from string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "linear" => Some(CurveMode::Linear),
            "classic" => Some(CurveMode::Classic),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CurveMode::Linear => "linear",
            CurveMode::Classic => "classic",
        }
    }
}

/// Shape parameters for the active curve family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveParams<F> {
    Linear(LinearCurve<F>),
    Classic(ClassicCurve<F>),
}

impl<F: FixedPoint> CurveParams<F> {
    pub fn mode(&self) -> CurveMode {
        match self {
            CurveParams::Linear(_) => CurveMode::Linear,
            CurveParams::Classic(_) => CurveMode::Classic,
        }
    }

    /// Speeds at or below this value are in the dead zone.
    pub fn offset(&self) -> F {
        match self {
            CurveParams::Linear(c) => c.offset,
            CurveParams::Classic(c) => c.offset,
        }
    }

    /// Bound on the gain; zero disables the cap.
    pub fn output_cap(&self) -> F {
        match self {
            CurveParams::Linear(c) => c.output_cap,
            CurveParams::Classic(c) => c.output_cap,
        }
    }

    /// Raw sensitivity delta at `speed`. Only meaningful for `speed > offset`.
    pub fn delta(&self, arith: Arith, speed: F) -> Result<F> {
        match self {
            CurveParams::Linear(c) => c.delta(arith, speed),
            CurveParams::Classic(c) => c.delta(arith, speed),
        }
    }
}

impl<F: FixedPoint> From<LinearCurve<F>> for CurveParams<F> {
    fn from(curve: LinearCurve<F>) -> Self {
        CurveParams::Linear(curve)
    }
}

impl<F: FixedPoint> From<ClassicCurve<F>> for CurveParams<F> {
    fn from(curve: ClassicCurve<F>) -> Self {
        CurveParams::Classic(curve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed::Fixed32;

    #[test]
    fn mode_parse() {
        assert_eq!(CurveMode::parse("linear"), Some(CurveMode::Linear));
        assert_eq!(CurveMode::parse("Classic"), Some(CurveMode::Classic));
        assert_eq!(CurveMode::parse("natural"), None);
        assert_eq!(CurveMode::Classic.as_str(), "classic");
    }

    #[test]
    fn params_report_their_family() {
        let linear: CurveParams<Fixed32> = LinearCurve {
            accel: Fixed32::ONE,
            offset: Fixed32::from_int(3),
            output_cap: Fixed32::from_int(2),
        }
        .into();
        assert_eq!(linear.mode(), CurveMode::Linear);
        assert_eq!(linear.offset(), Fixed32::from_int(3));
        assert_eq!(linear.output_cap(), Fixed32::from_int(2));

        let classic: CurveParams<Fixed32> = ClassicCurve::default().into();
        assert_eq!(classic.mode(), CurveMode::Classic);
    }
}
