//! # CLI Execution
//!
//! Extracted from `main.rs` to keep the entry point slim. Merges the command
//! line over the settings file, runs the search, optionally re-verifies the
//! pairs, then writes the results file and appends the run summary.

use anyhow::{bail, Result};
use chrono::Utc;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};
use twinsieve::config::Settings;
use twinsieve::search::{self, Range, SearchOptions};
use twinsieve::summary::{RunSummary, SummaryFormat};
use twinsieve::verify;

use super::Cli;

/// Fully resolved run settings: CLI/env over settings file over defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub results: PathBuf,
    pub summary: PathBuf,
    pub summary_format: SummaryFormat,
    pub threads: usize,
    pub progress_interval: Option<Duration>,
    pub verify: bool,
    pub mr_rounds: u32,
}

impl RunConfig {
    fn resolve(cli: &Cli, settings: Settings) -> Self {
        let interval_secs = cli
            .progress_interval
            .unwrap_or(settings.progress.interval_secs);
        RunConfig {
            results: cli.output.clone().unwrap_or(settings.output.results),
            summary: cli.summary.clone().unwrap_or(settings.output.summary),
            summary_format: cli.summary_format.unwrap_or(settings.output.summary_format),
            threads: cli.threads.unwrap_or(settings.sieve.threads),
            progress_interval: (interval_secs > 0).then(|| Duration::from_secs(interval_secs)),
            verify: cli.verify || settings.verify.enabled,
            mr_rounds: cli.mr_rounds.unwrap_or(settings.verify.mr_rounds),
        }
    }
}

pub fn run(cli: &Cli) -> Result<()> {
    let range = Range::new(cli.inf, cli.sup)?;
    let settings = Settings::load(cli.config.as_deref())?;
    let cfg = RunConfig::resolve(cli, settings);

    configure_rayon(cfg.threads);
    info!(
        inf = range.inf(),
        sup = range.sup(),
        threads = cfg.threads,
        results = %cfg.results.display(),
        "twinsieve starting"
    );

    let opts = SearchOptions {
        workers: cfg.threads,
        progress_interval: cfg.progress_interval,
    };
    let outcome = search::run(range, &opts)?;

    if cfg.verify {
        let report = verify::verify_pairs(&outcome.pairs, cfg.mr_rounds);
        if !report.passed() {
            bail!(
                "{} of {} pairs failed the Miller-Rabin re-check",
                report.failures.len(),
                report.checked
            );
        }
    }

    let summary = RunSummary {
        timestamp: Utc::now(),
        inf: range.inf(),
        sup: range.sup(),
        pairs_found: outcome.pairs.len() as u64,
        elapsed_secs: outcome.elapsed.as_secs_f64(),
        workers: outcome.workers,
    };
    println!("{}", summary.line());
    summary.append(&cfg.summary, cfg.summary_format)?;
    println!("Resume successfully updated to file {}", cfg.summary.display());

    outcome.pairs.write_to_file(&cfg.results)?;
    info!(
        pairs = outcome.pairs.len(),
        path = %cfg.results.display(),
        "results written"
    );
    Ok(())
}

/// Size rayon's global pool (used by `--verify`) to match the sieve.
pub fn configure_rayon(threads: usize) {
    if threads > 0 {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
        {
            warn!(error = %e, "Could not configure rayon thread pool");
        }
    }
}
