use super::ConfigArgs;
use anyhow::Result;
use clap::Args;

#[derive(Args)]
pub struct ParamsArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

impl ParamsArgs {
    pub fn run(&self) -> Result<()> {
        let config = self.config.load()?;
        print!("{}", config.to_toml()?);
        Ok(())
    }
}
