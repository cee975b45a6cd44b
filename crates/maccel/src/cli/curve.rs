use super::ConfigArgs;
use crate::config::{Config, Format};
use anyhow::{Result, bail};
use clap::Args;
use maccel_core::{Fixed32, Fixed64, FixedPoint, sensitivity_f64};
use serde::Serialize;

#[derive(Args)]
pub struct CurveArgs {
    /// Highest input speed to tabulate.
    #[arg(long, default_value_t = 80.0)]
    pub max: f64,

    /// Distance between tabulated speeds.
    #[arg(long, default_value_t = 1.0)]
    pub step: f64,

    /// Print JSON instead of a table.
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    pub speed: f64,
    pub x: f64,
    pub y: f64,
}

impl CurveArgs {
    pub fn run(&self) -> Result<()> {
        let config = self.config.load()?;
        let points = match config.format {
            Format::Q16_16 => tabulate::<Fixed32>(&config, self.max, self.step)?,
            Format::Q32_32 => tabulate::<Fixed64>(&config, self.max, self.step)?,
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&points)?);
            return Ok(());
        }

        println!("{:>10} {:>12} {:>12}", "speed", "sens_x", "sens_y");
        for p in points {
            println!("{:>10.3} {:>12.6} {:>12.6}", p.speed, p.x, p.y);
        }
        Ok(())
    }
}

/// Sensitivity at `0, step, 2*step, ..` up to and including `max`.
pub fn tabulate<F: FixedPoint>(config: &Config, max: f64, step: f64) -> Result<Vec<Point>> {
    if !step.is_finite() || step <= 0.0 {
        bail!("step must be a positive number, got {step}");
    }
    if !max.is_finite() || max < 0.0 {
        bail!("max must be a non-negative number, got {max}");
    }

    let params = config.accel_params::<F>()?;
    let arith = config.arith();
    let count = (max / step).floor() as usize;

    (0..=count)
        .map(|i| {
            let speed = i as f64 * step;
            let (x, y) = sensitivity_f64(arith, speed, &params)?;
            Ok(Point { speed, x, y })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capped_linear_table() {
        let config = Config::from_toml(
            r#"
yx_ratio = 2
[linear]
accel = 1
output_cap = 2
"#,
        )
        .unwrap();
        let points = tabulate::<Fixed64>(&config, 2.0, 0.5).unwrap();
        let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
        // delta = speed, capped at 1
        assert_eq!(xs, vec![1.0, 1.5, 2.0, 2.0, 2.0]);
        assert!(points.iter().all(|p| p.y == 2.0 * p.x));
    }

    #[test]
    fn rejects_non_positive_step() {
        assert!(tabulate::<Fixed32>(&Config::default(), 10.0, 0.0).is_err());
        assert!(tabulate::<Fixed32>(&Config::default(), 10.0, f64::NAN).is_err());
        assert!(tabulate::<Fixed32>(&Config::default(), -1.0, 1.0).is_err());
    }

    #[test]
    fn json_shape() {
        let points = tabulate::<Fixed32>(&Config::default(), 1.0, 1.0).unwrap();
        insta::assert_snapshot!(
            serde_json::to_string(&points).unwrap(),
            @r#"[{"speed":0.0,"x":1.0,"y":1.0},{"speed":1.0,"x":1.0,"y":1.0}]"#
        );
    }
}
