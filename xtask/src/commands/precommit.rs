use anyhow::Result;
use clap::Args;
use xshell::Shell;

use super::common;

#[derive(Args)]
pub struct Precommit;

impl Precommit {
    pub fn run(&self, sh: &Shell) -> Result<()> {
        common::fmt(sh, true)?;
        common::clippy(sh)?;
        eprintln!("Precommit checks passed!");
        Ok(())
    }
}
