//! Observation of intermediate values.
//!
//! The accelerator only builds [`TraceEvent`]s when its sink reports itself
//! enabled, and never reads anything back from the sink, so tracing cannot
//! change a computed result.

use crate::{curves::CurveMode, fixed::FixedPoint};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceEvent<F> {
    Input { x: i32, y: i32, dx: F, dy: F },
    Speed { speed: F, interval: F },
    Curve { mode: CurveMode, offset: F, output_cap: F },
    Sensitivity { base: F, x: F, y: F },
    Output { raw_x: F, raw_y: F, x: i32, y: i32 },
    Carry { x: F, y: F },
}

pub trait Trace<F> {
    fn enabled(&self) -> bool {
        true
    }

    fn record(&mut self, event: TraceEvent<F>);
}

// Tracing disabled
impl<F> Trace<F> for () {
    fn enabled(&self) -> bool {
        false
    }

    fn record(&mut self, _event: TraceEvent<F>) {}
}

/// Forwards events to `tracing` at debug level under the `maccel` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingTrace;

impl<F: FixedPoint> Trace<F> for TracingTrace {
    fn enabled(&self) -> bool {
        tracing::enabled!(target: "maccel", tracing::Level::DEBUG)
    }

    fn record(&mut self, event: TraceEvent<F>) {
        match event {
            TraceEvent::Input { x, y, dx, dy } => {
                tracing::debug!(target: "maccel", x, y, %dx, %dy, "input");
            }
            TraceEvent::Speed { speed, interval } => {
                tracing::debug!(target: "maccel", %speed, %interval, "speed");
            }
            TraceEvent::Curve {
                mode,
                offset,
                output_cap,
            } => {
                tracing::debug!(
                    target: "maccel",
                    mode = mode.as_str(),
                    %offset,
                    %output_cap,
                    "curve"
                );
            }
            TraceEvent::Sensitivity { base, x, y } => {
                tracing::debug!(target: "maccel", %base, %x, %y, "sensitivity");
            }
            TraceEvent::Output { raw_x, raw_y, x, y } => {
                tracing::debug!(target: "maccel", %raw_x, %raw_y, x, y, "output");
            }
            TraceEvent::Carry { x, y } => {
                tracing::debug!(target: "maccel", %x, %y, "carry");
            }
        }
    }
}

/// Keeps every event in memory.
#[derive(Debug)]
pub struct RecordingTrace<F> {
    pub events: Vec<TraceEvent<F>>,
}

impl<F> Default for RecordingTrace<F> {
    fn default() -> Self {
        Self { events: Vec::new() }
    }
}

impl<F> Trace<F> for RecordingTrace<F> {
    fn record(&mut self, event: TraceEvent<F>) {
        self.events.push(event);
    }
}
