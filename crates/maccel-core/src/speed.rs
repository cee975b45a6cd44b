// Input speed estimation

use crate::fixed::{Arith, FixedPoint, Result};

/// Reduces one displacement sample and the time since the previous sample to
/// a non-negative speed.
///
/// Implementations must return zero for a zero displacement and must not
/// divide by a zero interval.
pub trait SpeedEstimator<F: FixedPoint> {
    fn estimate(&mut self, arith: Arith, dx: F, dy: F, interval: F) -> Result<F>;
}

/// Euclidean distance per unit of time: `sqrt(dx² + dy²) / interval`.
///
/// A zero or negative interval yields a speed of zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct EuclideanSpeed;

impl<F: FixedPoint> SpeedEstimator<F> for EuclideanSpeed {
    fn estimate(&mut self, arith: Arith, dx: F, dy: F, interval: F) -> Result<F> {
        if interval.raw() <= 0 {
            return Ok(F::ZERO);
        }
        // sqrt(raw_x² + raw_y²) is already at the fractional scale. Squares of
        // at most 64-bit raws sum below 2^128.
        let x = dx.raw().unsigned_abs();
        let y = dy.raw().unsigned_abs();
        let distance = arith.narrow::<F>((x * x + y * y).isqrt() as i128, "speed")?;
        arith.div(distance, interval)
    }
}

/// Reports the same speed for every sample, ignoring the displacement.
///
/// Useful for driving the accelerator at a known point on the curve.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstantSpeed<F>(pub F);

impl<F: FixedPoint> SpeedEstimator<F> for ConstantSpeed<F> {
    fn estimate(&mut self, _arith: Arith, _dx: F, _dy: F, _interval: F) -> Result<F> {
        Ok(self.0)
    }
}
