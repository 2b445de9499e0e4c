mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use commands::check::CheckArgs;
use commands::init::InitArgs;
use commands::stats::StatsArgs;
use commands::watch::WatchArgs;
use grue::config::Config;
use grue::error::ExitError;
use grue::telemetry;

#[derive(Debug, Parser)]
#[command(
    name = "grue",
    version,
    about = "Notice when a link is posted again in the same channel"
)]
struct Cli {
    /// Config file (defaults to <config dir>/grue/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check one statement against the channel's history and record it
    Check(CheckArgs),
    /// Read tab-separated channel, speaker, text lines from stdin and report repeats
    Watch(WatchArgs),
    /// Show how many links each channel remembers
    Stats(StatsArgs),
    /// Write a commented default config file
    Init(InitArgs),
    /// Print the JSON Schema for the config file
    Schema,
}

impl Commands {
    const fn name(&self) -> &'static str {
        match self {
            Self::Check(_) => "check",
            Self::Watch(_) => "watch",
            Self::Stats(_) => "stats",
            Self::Init(_) => "init",
            Self::Schema => "schema",
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = || Config::resolve(cli.config.as_deref());
    match &cli.command {
        Commands::Check(args) => args.execute(&config()?),
        Commands::Watch(args) => args.execute(&config()?),
        Commands::Stats(args) => args.execute(&config()?),
        Commands::Init(args) => args.execute(cli.config.as_deref()),
        Commands::Schema => commands::schema::run_schema(),
    }
}

fn main() -> ExitCode {
    let _telemetry = telemetry::init();

    let cli = Cli::parse();

    let _span = tracing::info_span!("command", name = cli.command.name()).entered();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(exit_err) = e.downcast_ref::<ExitError>() {
                eprintln!("error: {exit_err}");
                exit_err.exit_code()
            } else {
                eprintln!("error: {e:#}");
                ExitCode::FAILURE
            }
        }
    }
}
