use anyhow::{Context, Result};
use maccel_core::{
    AccelParams, Arith, ClassicCurve, CurveMode, CurveParams, FixedPoint, LinearCurve, Overflow,
};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Acceleration settings for one device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Active curve family
    #[serde(default)]
    pub mode: Mode,

    /// Fixed-point representation used for every computation
    #[serde(default)]
    pub format: Format,

    /// What happens when an intermediate value does not fit the format
    #[serde(default)]
    pub overflow: OverflowPolicy,

    /// Emit per-sample debug events
    #[serde(default)]
    pub trace: bool,

    /// Global sensitivity multiplier
    #[serde(default = "default_one")]
    pub sens_mult: f64,

    /// Y axis multiplier relative to X
    #[serde(default = "default_one")]
    pub yx_ratio: f64,

    #[serde(default)]
    pub linear: LinearConfig,

    #[serde(default)]
    pub classic: ClassicConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            format: Format::default(),
            overflow: OverflowPolicy::default(),
            trace: false,
            sens_mult: default_one(),
            yx_ratio: default_one(),
            linear: LinearConfig::default(),
            classic: ClassicConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Linear,
    Classic,
}

impl From<Mode> for CurveMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Linear => CurveMode::Linear,
            Mode::Classic => CurveMode::Classic,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Format {
    #[serde(rename = "q16.16")]
    Q16_16,
    #[default]
    #[serde(rename = "q32.32")]
    Q32_32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    Wrapping,
    #[default]
    Saturating,
    Checked,
}

impl From<OverflowPolicy> for Overflow {
    fn from(policy: OverflowPolicy) -> Self {
        match policy {
            OverflowPolicy::Wrapping => Overflow::Wrapping,
            OverflowPolicy::Saturating => Overflow::Saturating,
            OverflowPolicy::Checked => Overflow::Checked,
        }
    }
}

/// Quadratic curve parameters
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LinearConfig {
    #[serde(default)]
    pub accel: f64,
    #[serde(default)]
    pub offset: f64,
    #[serde(default)]
    pub output_cap: f64,
}

/// Power curve parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassicConfig {
    #[serde(default)]
    pub accel: f64,
    #[serde(default = "default_power")]
    pub power: f64,
    #[serde(default)]
    pub offset: f64,
    #[serde(default)]
    pub output_cap: f64,
}

impl Default for ClassicConfig {
    fn default() -> Self {
        Self {
            accel: 0.0,
            power: default_power(),
            offset: 0.0,
            output_cap: 0.0,
        }
    }
}

fn default_one() -> f64 {
    1.0
}

fn default_power() -> f64 {
    2.0
}

impl Config {
    /// Load configuration from a file, auto-detecting TOML or JSON format
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;

        let extension = path.extension().and_then(|s| s.to_str());

        match extension {
            Some("toml") => Self::from_toml(&content),
            Some("json") => Self::from_json(&content),
            _ => {
                // Try TOML first (preferred), fall back to JSON
                Self::from_toml(&content).or_else(|_| Self::from_json(&content))
            }
        }
    }

    /// Parse configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("failed to parse config as TOML")
    }

    /// Parse configuration from JSON string
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("failed to parse config as JSON")
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("failed to render config as TOML")
    }

    pub fn arith(&self) -> Arith {
        Arith::new(self.overflow.into())
    }

    /// Check that every value fits the configured format
    pub fn validate(&self) -> Result<()> {
        match self.format {
            Format::Q16_16 => self.accel_params::<maccel_core::Fixed32>().map(drop),
            Format::Q32_32 => self.accel_params::<maccel_core::Fixed64>().map(drop),
        }
    }

    /// Parameters for the active mode converted to `F`
    pub fn accel_params<F: FixedPoint>(&self) -> Result<AccelParams<F>> {
        let arith = self.arith();
        let fixed = |name: &str, value: f64| -> Result<F> {
            arith
                .from_f64(value)
                .with_context(|| format!("invalid value for {name}"))
        };

        let curve = match self.mode {
            Mode::Linear => CurveParams::Linear(LinearCurve {
                accel: fixed("linear.accel", self.linear.accel)?,
                offset: fixed("linear.offset", self.linear.offset)?,
                output_cap: fixed("linear.output_cap", self.linear.output_cap)?,
            }),
            Mode::Classic => CurveParams::Classic(ClassicCurve {
                accel: fixed("classic.accel", self.classic.accel)?,
                power: fixed("classic.power", self.classic.power)?,
                offset: fixed("classic.offset", self.classic.offset)?,
                output_cap: fixed("classic.output_cap", self.classic.output_cap)?,
            }),
        };

        Ok(AccelParams {
            sens_mult: fixed("sens_mult", self.sens_mult)?,
            yx_ratio: fixed("yx_ratio", self.yx_ratio)?,
            curve,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maccel_core::{Fixed32, Fixed64};

    #[test]
    fn test_parse_toml() {
        let toml = r#"
mode = "classic"
format = "q16.16"
overflow = "checked"
sens_mult = 0.8

[classic]
accel = 0.3
power = 2.5
offset = 2
output_cap = 1.5
"#;

        let config = Config::from_toml(toml).unwrap();
        assert_eq!(config.mode, Mode::Classic);
        assert_eq!(config.format, Format::Q16_16);
        assert_eq!(config.overflow, OverflowPolicy::Checked);
        assert_eq!(config.sens_mult, 0.8);
        assert_eq!(config.yx_ratio, 1.0);
        assert_eq!(config.classic.power, 2.5);
        assert_eq!(config.linear, LinearConfig::default());
    }

    #[test]
    fn test_parse_json() {
        let json = r#"{
            "mode": "linear",
            "yx_ratio": 2.0,
            "linear": { "accel": 0.05, "offset": 4.0 }
        }"#;

        let config = Config::from_json(json).unwrap();
        assert_eq!(config.mode, Mode::Linear);
        assert_eq!(config.format, Format::Q32_32);
        assert_eq!(config.yx_ratio, 2.0);
        assert_eq!(config.linear.accel, 0.05);
        assert_eq!(config.linear.output_cap, 0.0);
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.sens_mult, 1.0);
        assert_eq!(config.classic.power, 2.0);
        assert_eq!(config.overflow, OverflowPolicy::Saturating);
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        assert!(Config::from_toml(r#"mode = "natural""#).is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config {
            mode: Mode::Classic,
            classic: ClassicConfig {
                accel: 0.25,
                ..ClassicConfig::default()
            },
            ..Config::default()
        };
        let rendered = config.to_toml().unwrap();
        assert_eq!(Config::from_toml(&rendered).unwrap(), config);
    }

    #[test]
    fn test_params_for_active_mode() {
        let config = Config::from_toml(
            r#"
mode = "classic"
[classic]
accel = 0.5
power = 3
"#,
        )
        .unwrap();
        let params = config.accel_params::<Fixed64>().unwrap();
        assert_eq!(
            params.curve,
            CurveParams::Classic(ClassicCurve {
                accel: Fixed64::from_f64(0.5).unwrap(),
                power: Fixed64::from_int(3),
                offset: Fixed64::ZERO,
                output_cap: Fixed64::ZERO,
            })
        );
        assert_eq!(params.sens_mult, Fixed64::ONE);
    }

    #[test]
    fn test_validate_checks_representability() {
        let config = Config::from_toml(
            r#"
format = "q16.16"
sens_mult = 50000
"#,
        )
        .unwrap();
        let err = config.validate().unwrap_err();
        assert!(format!("{err:#}").contains("sens_mult"), "{err:#}");

        let config = Config {
            format: Format::Q32_32,
            ..config
        };
        config.validate().unwrap();
        assert!(config.accel_params::<Fixed32>().is_err());
    }

    #[test]
    fn test_validate_rejects_first_value_past_q32_32() {
        let config = Config::from_toml(r#"sens_mult = 2147483648
overflow = "checked""#).unwrap();
        let err = config.validate().unwrap_err();
        assert!(format!("{err:#}").contains("sens_mult"), "{err:#}");
    }
}
