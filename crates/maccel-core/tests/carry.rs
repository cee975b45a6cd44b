//! Long runs at constant gain must not drift.

use maccel_core::{
    AccelParams, Accelerator, Displacement, Fixed32, Fixed64, FixedPoint, LinearCurve,
    speed::ConstantSpeed,
};
use proptest::prelude::*;

/// Gain of exactly `sens_mult` at every speed.
fn flat<F: FixedPoint>(sens_mult: F) -> AccelParams<F> {
    AccelParams {
        sens_mult,
        yx_ratio: F::ONE,
        curve: LinearCurve {
            accel: F::ZERO,
            offset: F::ZERO,
            output_cap: F::ZERO,
        }
        .into(),
    }
}

fn run<F: FixedPoint>(gain: F, d: Displacement, samples: usize) -> (i64, i64) {
    let params = flat(gain);
    let mut accel = Accelerator::<F>::default();
    let (mut sum_x, mut sum_y) = (0i64, 0i64);
    for _ in 0..samples {
        let mut delta = d;
        accel.accelerate(&params, &mut delta, F::ONE).unwrap();
        sum_x += delta.x as i64;
        sum_y += delta.y as i64;
    }
    (sum_x, sum_y)
}

fn expected(samples: usize, d: i32, gain: f64) -> f64 {
    (samples as f64 * d as f64 * gain).round()
}

#[test]
fn gain_below_one() {
    let gain = Fixed32::from_f64(0.3).unwrap();
    let (x, y) = run(gain, Displacement::new(7, -7), 1000);
    assert!((x as f64 - expected(1000, 7, 0.3)).abs() <= 1.0, "x = {x}");
    assert!((y as f64 - expected(1000, -7, 0.3)).abs() <= 1.0, "y = {y}");
}

#[test]
fn non_integer_gain_above_one() {
    let gain = Fixed64::from_f64(1.37).unwrap();
    let (x, y) = run(gain, Displacement::new(3, 11), 5000);
    assert!((x as f64 - expected(5000, 3, 1.37)).abs() <= 1.0, "x = {x}");
    assert!((y as f64 - expected(5000, 11, 1.37)).abs() <= 1.0, "y = {y}");
}

#[test]
fn single_count_moves_below_unit_gain_still_arrive() {
    // Without carry every one of these would truncate to zero.
    let gain = Fixed32::from_f64(0.25).unwrap();
    let (x, _) = run(gain, Displacement::new(1, 0), 1000);
    assert_eq!(x, 250);
}

#[test]
fn carry_is_independent_of_the_speed_curve() {
    let params = AccelParams::new(LinearCurve {
        accel: Fixed64::from_f64(0.1).unwrap(),
        offset: Fixed64::ZERO,
        output_cap: Fixed64::from_f64(1.5).unwrap(),
    });
    // Constant speed means constant gain: 1 + min(0.1 * 4, 0.5) = 1.4
    let mut accel = Accelerator::<Fixed64>::default().with_estimator(ConstantSpeed(Fixed64::from_int(4)));
    let mut sum = 0i64;
    for _ in 0..1000 {
        let mut d = Displacement::new(3, 0);
        accel.accelerate(&params, &mut d, Fixed64::ONE).unwrap();
        sum += d.x as i64;
    }
    assert!((sum - 4200).abs() <= 1, "sum = {sum}");
}

proptest! {
    #[test]
    fn prop_cumulative_output_tracks_exact_product(
        d in -120i32..120,
        gain_64ths in 1u32..400,
    ) {
        // Dyadic gains are exact in both formats.
        let gain = gain_64ths as f64 / 64.0;
        let samples = 1000;

        let (x32, _) = run(Fixed32::from_f64(gain).unwrap(), Displacement::new(d, 0), samples);
        let (x64, _) = run(Fixed64::from_f64(gain).unwrap(), Displacement::new(d, 0), samples);

        let want = expected(samples, d, gain);
        prop_assert!((x32 as f64 - want).abs() <= 1.0, "q16.16 drifted: {} vs {}", x32, want);
        prop_assert!((x64 as f64 - want).abs() <= 1.0, "q32.32 drifted: {} vs {}", x64, want);
    }
}
