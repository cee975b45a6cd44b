//! Per-sample acceleration with fractional carry.
//!
//! An [`Accelerator`] belongs to one logical pointing device. Each call
//! scales a raw displacement by the current sensitivity and truncates the
//! result to whole counts; the truncated fraction is kept per axis and added
//! to the next sample, so the output stream does not drift at constant gain.
//! Calls take `&mut self`: one stream, one writer.

use crate::{
    echo::SpeedEcho,
    fixed::{Arith, FixedPoint, Result},
    sensitivity::{AccelParams, Sensitivity, sensitivity},
    speed::{EuclideanSpeed, SpeedEstimator},
    trace::{Trace, TraceEvent},
};
use std::fmt;

/// Integer displacement of one input sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Displacement {
    pub x: i32,
    pub y: i32,
}

impl Displacement {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// What one [`Accelerator::accelerate`] call computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample<F> {
    pub speed: F,
    pub sensitivity: Sensitivity<F>,
}

pub struct Accelerator<F, E = EuclideanSpeed, T = ()> {
    arith: Arith,
    estimator: E,
    trace: T,
    echo: Option<SpeedEcho<F>>,
    carry_x: F,
    carry_y: F,
}

impl<F: FixedPoint, E: fmt::Debug, T> fmt::Debug for Accelerator<F, E, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accelerator")
            .field("arith", &self.arith)
            .field("estimator", &self.estimator)
            .field("echo", &self.echo)
            .field("carry_x", &self.carry_x)
            .field("carry_y", &self.carry_y)
            .finish_non_exhaustive()
    }
}

impl<F: FixedPoint> Accelerator<F> {
    pub fn new(arith: Arith) -> Self {
        Self {
            arith,
            estimator: EuclideanSpeed,
            trace: (),
            echo: None,
            carry_x: F::ZERO,
            carry_y: F::ZERO,
        }
    }
}

impl<F: FixedPoint> Default for Accelerator<F> {
    fn default() -> Self {
        Self::new(Arith::default())
    }
}

impl<F, E, T> Accelerator<F, E, T>
where
    F: FixedPoint,
    E: SpeedEstimator<F>,
    T: Trace<F>,
{
    pub fn with_estimator<E2: SpeedEstimator<F>>(self, estimator: E2) -> Accelerator<F, E2, T> {
        Accelerator {
            arith: self.arith,
            estimator,
            trace: self.trace,
            echo: self.echo,
            carry_x: self.carry_x,
            carry_y: self.carry_y,
        }
    }

    pub fn with_trace<T2: Trace<F>>(self, trace: T2) -> Accelerator<F, E, T2> {
        Accelerator {
            arith: self.arith,
            estimator: self.estimator,
            trace,
            echo: self.echo,
            carry_x: self.carry_x,
            carry_y: self.carry_y,
        }
    }

    /// Publish every computed speed to `echo`.
    pub fn with_echo(mut self, echo: SpeedEcho<F>) -> Self {
        self.echo = Some(echo);
        self
    }

    pub fn arith(&self) -> Arith {
        self.arith
    }

    pub fn trace(&self) -> &T {
        &self.trace
    }

    pub fn estimator_mut(&mut self) -> &mut E {
        &mut self.estimator
    }

    /// Residual fractions carried into the next sample.
    pub fn carry(&self) -> (F, F) {
        (self.carry_x, self.carry_y)
    }

    pub fn reset(&mut self) {
        self.carry_x = F::ZERO;
        self.carry_y = F::ZERO;
    }

    /// Scale `delta` in place.
    ///
    /// `params` is read fresh on every call. On error neither `delta`, the
    /// carry, nor the published speed is touched.
    pub fn accelerate(
        &mut self,
        params: &AccelParams<F>,
        delta: &mut Displacement,
        interval: F,
    ) -> Result<Sample<F>> {
        let arith = self.arith;
        let tracing = self.trace.enabled();

        let dx = arith.from_int::<F>(delta.x)?;
        let dy = arith.from_int::<F>(delta.y)?;
        if tracing {
            self.trace.record(TraceEvent::Input {
                x: delta.x,
                y: delta.y,
                dx,
                dy,
            });
        }

        let speed = self.estimator.estimate(arith, dx, dy, interval)?;
        if tracing {
            self.trace.record(TraceEvent::Speed { speed, interval });
            self.trace.record(TraceEvent::Curve {
                mode: params.curve.mode(),
                offset: params.curve.offset(),
                output_cap: params.curve.output_cap(),
            });
        }

        let sens = sensitivity(arith, speed, params)?;
        if tracing {
            self.trace.record(TraceEvent::Sensitivity {
                base: sens.base,
                x: sens.x,
                y: sens.y,
            });
        }

        let raw_x = arith.add(arith.mul(dx, sens.x)?, self.carry_x)?;
        let raw_y = arith.add(arith.mul(dy, sens.y)?, self.carry_y)?;
        let out_x = raw_x.trunc();
        let out_y = raw_y.trunc();
        let carry_x = arith.sub(raw_x, arith.from_int(out_x)?)?;
        let carry_y = arith.sub(raw_y, arith.from_int(out_y)?)?;

        self.carry_x = carry_x;
        self.carry_y = carry_y;
        *delta = Displacement::new(out_x, out_y);
        if let Some(echo) = &self.echo {
            echo.publish(speed);
        }

        if tracing {
            self.trace.record(TraceEvent::Output {
                raw_x,
                raw_y,
                x: out_x,
                y: out_y,
            });
            self.trace.record(TraceEvent::Carry {
                x: carry_x,
                y: carry_y,
            });
        }

        Ok(Sample {
            speed,
            sensitivity: sens,
        })
    }
}
