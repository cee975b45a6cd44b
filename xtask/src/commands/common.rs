use anyhow::Result;
use xshell::{Shell, cmd};

/// `cargo fmt` over the workspace; `check` leaves files untouched.
pub fn fmt(sh: &Shell, check: bool) -> Result<()> {
    let check = check.then_some("--check");
    eprintln!("Running cargo fmt...");
    cmd!(sh, "cargo fmt --all -- {check...}").run()?;
    Ok(())
}

/// Clippy over every target with warnings denied
pub fn clippy(sh: &Shell) -> Result<()> {
    eprintln!("Running cargo clippy...");
    cmd!(sh, "cargo clippy --workspace --all-targets -- -D warnings").run()?;
    Ok(())
}

/// `cargo test` with `PROPTEST_CASES` set when `cases` is given
pub fn test(sh: &Shell, cases: Option<u32>, args: &[String]) -> Result<()> {
    let _cases = cases.map(|n| sh.push_env("PROPTEST_CASES", n.to_string()));
    eprintln!("Running cargo test...");
    cmd!(sh, "cargo test {args...}").run()?;
    Ok(())
}
