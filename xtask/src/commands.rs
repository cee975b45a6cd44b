use anyhow::Result;
use clap::Subcommand;
use xshell::Shell;

pub mod ci;
pub mod common;
pub mod precommit;
pub mod test;

#[derive(Subcommand)]
pub enum Command {
    /// Run CI checks. Runs fmt, clippy and test when no step is given.
    Ci(ci::Ci),
    /// Format every crate in place
    Fmt,
    /// Check formatting and lints before committing
    Precommit(precommit::Precommit),
    /// Run the test suite, optionally with more property cases
    Test(test::Test),
}

impl Command {
    pub fn run(self, sh: &Shell) -> Result<()> {
        match self {
            Command::Ci(cmd) => cmd.run(sh),
            Command::Fmt => common::fmt(sh, false),
            Command::Precommit(cmd) => cmd.run(sh),
            Command::Test(cmd) => cmd.run(sh),
        }
    }
}
