use super::ConfigArgs;
use crate::config::{Config, Format};
use anyhow::{Context, Result};
use clap::Args;
use maccel_core::{Fixed32, Fixed64, FixedPoint, sensitivity};
use std::str::FromStr;

#[derive(Args)]
pub struct SensArgs {
    /// Input speed in counts per millisecond, e.g. `2.5`.
    pub speed: String,

    #[command(flatten)]
    pub config: ConfigArgs,
}

impl SensArgs {
    pub fn run(&self) -> Result<()> {
        let config = self.config.load()?;
        let line = match config.format {
            Format::Q16_16 => sens_line::<Fixed32>(&config, &self.speed)?,
            Format::Q32_32 => sens_line::<Fixed64>(&config, &self.speed)?,
        };
        println!("{line}");
        Ok(())
    }
}

/// `"<x> <y>"` at the given speed.
pub fn sens_line<F>(config: &Config, speed: &str) -> Result<String>
where
    F: FixedPoint + FromStr<Err = maccel_core::FixedError>,
{
    let speed: F = speed
        .parse()
        .with_context(|| format!("invalid speed '{speed}'"))?;
    let params = config.accel_params::<F>()?;
    let sens = sensitivity(config.arith(), speed, &params)?;
    Ok(format!("{} {}", sens.x, sens.y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quadratic_at_speed_two() {
        let config = Config::from_toml(
            r#"
format = "q16.16"
[linear]
accel = 1
"#,
        )
        .unwrap();
        assert_eq!(sens_line::<Fixed32>(&config, "2").unwrap(), "3.0000 3.0000");
    }

    #[test]
    fn rejects_bad_speed() {
        let err = sens_line::<Fixed64>(&Config::default(), "fast").unwrap_err();
        assert!(format!("{err:#}").contains("invalid speed 'fast'"));
    }
}
