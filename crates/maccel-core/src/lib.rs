//! Fixed-point mouse acceleration.
//!
//! The pipeline for one input sample is: speed estimation
//! ([`speed`]), curve evaluation ([`curves`]), sensitivity composition
//! ([`sensitivity`]) and finally scaling with fractional carry
//! ([`accel`]). Everything runs on the fixed-point kernel in [`fixed`];
//! floating point only appears in the `*_f64` conversions.
//!
//! No device or transport code lives here.

pub mod accel;
pub mod curves;
pub mod echo;
pub mod fixed;
pub mod sensitivity;
pub mod speed;
pub mod trace;

pub use accel::{Accelerator, Displacement, Sample};
pub use curves::{ClassicCurve, CurveMode, CurveParams, LinearCurve};
pub use echo::SpeedEcho;
pub use fixed::{Arith, Fixed32, Fixed64, FixedError, FixedPoint, Overflow};
pub use sensitivity::{AccelParams, Sensitivity, sensitivity, sensitivity_f64};
