use anyhow::Result;
use clap::Args;
use xshell::Shell;

use super::common;

#[derive(Args)]
pub struct Test {
    /// Number of cases per property test
    #[arg(long)]
    cases: Option<u32>,

    /// Only test the fixed-point core
    #[arg(long)]
    core: bool,

    /// Extra arguments for cargo test
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

impl Test {
    pub fn run(&self, sh: &Shell) -> Result<()> {
        let mut args = Vec::new();
        if self.core {
            args.extend(["--package".to_string(), "maccel-core".to_string()]);
        }
        args.extend(self.args.iter().cloned());
        common::test(sh, self.cases, &args)
    }
}
