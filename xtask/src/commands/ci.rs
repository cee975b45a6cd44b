use anyhow::Result;
use clap::{Args, Subcommand};
use xshell::Shell;

use super::common;

#[derive(Args)]
pub struct Ci {
    #[command(subcommand)]
    step: Option<Step>,
}

#[derive(Subcommand)]
pub enum Step {
    /// Check formatting
    Fmt,
    /// Lint with clippy
    Clippy,
    /// Run the tests
    Test {
        /// Extra arguments for cargo test
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

/// Property cases in CI, above the proptest default of 256.
const CI_PROPTEST_CASES: u32 = 1024;

impl Ci {
    pub fn run(&self, sh: &Shell) -> Result<()> {
        match &self.step {
            Some(step) => step.run(sh),
            None => {
                Step::Fmt.run(sh)?;
                Step::Clippy.run(sh)?;
                Step::Test { args: Vec::new() }.run(sh)
            }
        }
    }
}

impl Step {
    pub fn run(&self, sh: &Shell) -> Result<()> {
        match self {
            Step::Fmt => common::fmt(sh, true),
            Step::Clippy => common::clippy(sh),
            Step::Test { args } => common::test(sh, Some(CI_PROPTEST_CASES), args),
        }
    }
}
