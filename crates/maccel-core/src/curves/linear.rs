// Linear acceleration: the gain grows linearly with speed well above the offset.

use crate::fixed::{Arith, FixedPoint, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinearCurve<F> {
    pub accel: F,
    pub offset: F,
    pub output_cap: F,
}

impl<F: FixedPoint> LinearCurve<F> {
    /// `accel * (speed - offset)^2 / speed`
    pub fn delta(&self, arith: Arith, speed: F) -> Result<F> {
        let excess = arith.sub(speed, self.offset)?;
        let squared = arith.mul(excess, excess)?;
        arith.mul(self.accel, arith.div(squared, speed)?)
    }
}
