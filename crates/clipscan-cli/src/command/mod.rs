use std::io;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use self::{draw::DrawArg, durations::DurationsArg, generate::GenerateArg, scan::ScanArg};

mod draw;
mod durations;
mod generate;
mod scan;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Log debug output (overridden by `RUST_LOG`)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Record the first qualifying period per entity
    Scan(#[clap(flatten)] ScanArg),
    /// Extract time-to-event durations and a Kaplan-Meier summary
    Durations(#[clap(flatten)] DurationsArg),
    /// Generate a synthetic observation panel
    Generate(#[clap(flatten)] GenerateArg),
    /// Draw one category per row of a probability matrix
    Draw(#[clap(flatten)] DrawArg),
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    #[default]
    Table,
    Json,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_tracing(args.verbose);

    match args.mode {
        Mode::Scan(arg) => scan::run(&arg)?,
        Mode::Durations(arg) => durations::run(&arg)?,
        Mode::Generate(arg) => generate::run(&arg)?,
        Mode::Draw(arg) => draw::run(&arg)?,
    }
    Ok(())
}
