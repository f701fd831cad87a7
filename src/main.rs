//! # Main — CLI Entry Point
//!
//! `twinsieve <INF> <SUP>` enumerates every twin prime pair inside the
//! inclusive range, writes them to the results file (one `a, b` line each)
//! and appends a run summary to the summary log.
//!
//! ## Options
//!
//! - `--config` / `TWINSIEVE_CONFIG`: TOML settings file (default
//!   `twinsieve.toml` when present).
//! - `--output`, `--summary`, `--summary-format`: where results and run
//!   statistics go.
//! - `--threads` / `TWINSIEVE_THREADS`: sieve worker count (0 = all cores).
//! - `--progress-interval`: seconds between progress log lines (0 = off).
//! - `--verify`, `--mr-rounds`: Miller–Rabin re-check of every emitted pair.
//!
//! Logging goes to stderr; `LOG_FORMAT=json` switches to JSON lines and
//! `RUST_LOG` sets the filter.

mod cli;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use twinsieve::summary::SummaryFormat;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(
    name = "twinsieve",
    version,
    about = "Enumerate twin prime pairs (p, p+2) within an inclusive range"
)]
struct Cli {
    /// Lower bound of the search range (inclusive)
    inf: u64,

    /// Upper bound of the search range (inclusive, must be >= lower bound)
    sup: u64,

    /// TOML settings file (defaults to ./twinsieve.toml when it exists)
    #[arg(long, env = "TWINSIEVE_CONFIG")]
    config: Option<PathBuf>,

    /// Results file, one "a, b" line per pair (default: output.txt)
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Summary log the run statistics are appended to (default: resumes.txt)
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Summary record format
    #[arg(long, value_enum)]
    summary_format: Option<SummaryFormat>,

    /// Number of sieve worker threads (defaults to all logical cores)
    #[arg(long, env = "TWINSIEVE_THREADS")]
    threads: Option<usize>,

    /// Seconds between progress log lines while sieving (0 disables)
    #[arg(long)]
    progress_interval: Option<u64>,

    /// Re-check every emitted pair with Miller-Rabin before writing results
    #[arg(long)]
    verify: bool,

    /// Miller-Rabin rounds used by --verify (default: 15)
    #[arg(long)]
    mr_rounds: Option<u32>,
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_default();
    if log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }

    let cli = Cli::parse();
    cli::run(&cli)
}
