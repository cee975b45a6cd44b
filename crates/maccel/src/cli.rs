use crate::config::Config;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

pub mod curve;
pub mod params;
pub mod sens;
pub mod simulate;

#[derive(Args)]
pub struct ConfigArgs {
    /// Path to the configuration file (TOML or JSON).
    ///
    /// Built-in defaults are used when omitted.
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

impl ConfigArgs {
    pub fn load(&self) -> Result<Config> {
        let config = match &self.config {
            Some(path) => {
                tracing::debug!("loading config from {}", path.display());
                Config::from_file(path)?
            }
            None => Config::default(),
        };
        config.validate()?;
        Ok(config)
    }
}
