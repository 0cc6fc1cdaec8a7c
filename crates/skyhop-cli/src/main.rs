//! Skyhop CLI - headless runner for the Skyhop simulation core.
//!
//! ```text
//! skyhop run levels/demo.json --input demos/run_right.json
//! skyhop validate levels/*.json
//! skyhop config --config tuned.json
//! ```
//!
//! Log output goes to stderr and follows `RUST_LOG`; `--verbose` lowers the
//! default filter from `info` to `debug`.

mod campaign;
mod commands;
mod script;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{config, run, validate};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "skyhop")]
#[command(about = "Run Skyhop levels headlessly", long_about = None)]
#[command(version)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play levels in order against scripted input and print a JSON summary
    Run {
        /// Level files, played in order
        #[arg(required = true)]
        levels: Vec<PathBuf>,

        /// Simulation config (JSON); defaults are used when absent
        #[arg(long)]
        config: Option<PathBuf>,

        /// Input script (JSON); idle input when absent
        #[arg(long)]
        input: Option<PathBuf>,

        /// Stop after this many frames
        #[arg(long, default_value = "3600")]
        frames: u64,

        /// Write the summary here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check that level files load, and report their contents
    Validate {
        /// Level files
        #[arg(required = true)]
        levels: Vec<PathBuf>,

        /// Simulation config (JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective simulation config as JSON
    Config {
        /// Config file to merge over the defaults
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Run {
            levels,
            config,
            input,
            frames,
            output,
        } => run::run(run::RunArgs {
            levels,
            config,
            input,
            max_frames: frames,
            output,
        }),
        Commands::Validate {
            levels,
            config,
            json,
        } => validate::run(validate::ValidateArgs {
            levels,
            config,
            json,
        }),
        Commands::Config { config: path } => config::run(path.as_deref()),
    }
}
