//! Sensitivity composition.
//!
//! Turns a curve delta into the per-axis gain applied to a displacement:
//!
//! 1. at or below the curve offset the base sensitivity is exactly one;
//! 2. above it, the delta is optionally clamped by the output cap and added
//!    to (or, for a cap below one, subtracted from) one;
//! 3. the base sensitivity is scaled by the global multiplier for x, and
//!    additionally by the y:x ratio for y.

use crate::{
    curves::CurveParams,
    fixed::{Arith, FixedPoint, Result},
};

/// Everything the composer reads for one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccelParams<F> {
    /// Global multiplier applied to both axes.
    pub sens_mult: F,
    /// Extra multiplier for the y axis.
    pub yx_ratio: F,
    pub curve: CurveParams<F>,
}

impl<F: FixedPoint> AccelParams<F> {
    /// Unit multipliers around the given curve.
    pub fn new(curve: impl Into<CurveParams<F>>) -> Self {
        Self {
            sens_mult: F::ONE,
            yx_ratio: F::ONE,
            curve: curve.into(),
        }
    }
}

/// Gain for one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sensitivity<F> {
    /// Curve output before the global multiplier.
    pub base: F,
    pub x: F,
    pub y: F,
}

/// Gain before the multipliers.
pub fn base_sensitivity<F: FixedPoint>(arith: Arith, speed: F, curve: &CurveParams<F>) -> Result<F> {
    if speed <= curve.offset() {
        return Ok(F::ONE);
    }

    let mut delta = curve.delta(arith, speed)?;
    let mut sign = F::ONE;
    let output_cap = curve.output_cap();
    if output_cap != F::ZERO {
        let mut cap = arith.sub(output_cap, F::ONE)?;
        if cap.is_negative() {
            cap = arith.neg(cap)?;
            sign = arith.neg(sign)?;
        }
        delta = delta.min(cap);
    }

    arith.add(F::ONE, arith.mul(sign, delta)?)
}

pub fn sensitivity<F: FixedPoint>(
    arith: Arith,
    speed: F,
    params: &AccelParams<F>,
) -> Result<Sensitivity<F>> {
    let base = base_sensitivity(arith, speed, &params.curve)?;
    let x = arith.mul(base, params.sens_mult)?;
    let y = arith.mul(x, params.yx_ratio)?;
    Ok(Sensitivity { base, x, y })
}

/// [`sensitivity`] for callers working in floating point, e.g. when plotting.
pub fn sensitivity_f64<F: FixedPoint>(
    arith: Arith,
    speed: f64,
    params: &AccelParams<F>,
) -> Result<(f64, f64)> {
    let speed = arith.from_f64::<F>(speed)?;
    let sens = sensitivity(arith, speed, params)?;
    Ok((sens.x.to_f64(), sens.y.to_f64()))
}
