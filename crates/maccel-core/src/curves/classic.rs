// Classic acceleration: a power curve with a configurable exponent.

use crate::fixed::{Arith, FixedPoint, Result};

/// Power curve parameters.
///
/// `accel * (speed - offset)` must stay non-negative for every speed above
/// the offset; a negative base has no real power and evaluates to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassicCurve<F> {
    pub accel: F,
    pub power: F,
    pub offset: F,
    pub output_cap: F,
}

impl<F: FixedPoint> Default for ClassicCurve<F> {
    fn default() -> Self {
        Self {
            accel: F::ZERO,
            // two is the quadratic curve
            power: F::from_raw_wrapping(F::ONE.raw() * 2),
            offset: F::ZERO,
            output_cap: F::ZERO,
        }
    }
}

impl<F: FixedPoint> ClassicCurve<F> {
    /// `(accel * (speed - offset))^power / speed`
    pub fn delta(&self, arith: Arith, speed: F) -> Result<F> {
        let excess = arith.sub(speed, self.offset)?;
        let base = arith.mul(self.accel, excess)?;
        let raised = arith.pow(base, self.power)?;
        arith.div(raised, speed)
    }
}
