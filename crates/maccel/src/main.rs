use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cli;
mod config;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Command::Sens(args) => args.run(),
        Command::Curve(args) => args.run(),
        Command::Simulate(args) => args.run(),
        Command::Params(args) => args.run(),
    }
}

#[derive(Parser)]
#[command(name = "maccel", about = "Fixed-point mouse acceleration tooling")]
struct Cli {
    /// Log at debug level, including per-sample traces. Overrides RUST_LOG.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the x and y sensitivity at one input speed.
    Sens(cli::sens::SensArgs),
    /// Tabulate sensitivity over a range of input speeds.
    Curve(cli::curve::CurveArgs),
    /// Replay recorded samples through an accelerator.
    Simulate(cli::simulate::SimulateArgs),
    /// Print the effective configuration as TOML.
    Params(cli::params::ParamsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
