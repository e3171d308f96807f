//! CDR Command-Line Interface
//!
//! Generates near-Clifford training circuits from JSON circuit files.
//!
//! ```text
//! cdr generate -i ansatz.json -n 20 -f 0.1 --select probabilistic -o training.json
//! cdr count -i ansatz.json
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{count, generate, version};

/// CDR - near-Clifford training circuits for Clifford data regression
#[derive(Parser)]
#[command(name = "cdr")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate training circuits from a circuit
    Generate {
        /// Input circuit (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file; prints to stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file (YAML)
        #[arg(short, long, env = "CDR_CONFIG")]
        config: Option<PathBuf>,

        /// Number of training circuits
        #[arg(short, long)]
        num: Option<usize>,

        /// Fraction of non-Clifford rotations to keep (0-1)
        #[arg(short, long)]
        fraction: Option<f64>,

        /// Selection method (random, probabilistic)
        #[arg(long)]
        select: Option<String>,

        /// Replacement method (closest, random, probabilistic)
        #[arg(long)]
        replace: Option<String>,

        /// Method option as key=value (sigma_select, sigma_replace)
        #[arg(long = "option", value_name = "KEY=VALUE")]
        options: Vec<String>,

        /// RNG seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Fail on instructions outside the training basis instead of dropping them
        #[arg(long)]
        strict: bool,
    },

    /// Count non-Clifford rotations in a circuit
    Count {
        /// Input circuit (JSON)
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Generate {
            input,
            output,
            config,
            num,
            fraction,
            select,
            replace,
            options,
            seed,
            strict,
        } => generate::execute(&generate::GenerateArgs {
            input,
            output,
            config,
            num,
            fraction,
            select,
            replace,
            options,
            seed,
            strict,
        }),

        Commands::Count { input } => count::execute(&input),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
