//! # Summary — Appended Run Statistics
//!
//! Every successful run appends one record to the summary log: how long the
//! sieve and scan took, the range searched, and how many pairs came out.
//! The text format is a single human-readable line; the JSON format is one
//! serialized [`RunSummary`] per line for machine consumption.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SummaryFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub timestamp: DateTime<Utc>,
    pub inf: u64,
    pub sup: u64,
    pub pairs_found: u64,
    pub elapsed_secs: f64,
    pub workers: usize,
}

impl RunSummary {
    /// The single-line text rendering used in the summary log and on stdout.
    pub fn line(&self) -> String {
        format!(
            "Elapsed time: {:.6}, Range: {} to {}, Pairs found: {}",
            self.elapsed_secs, self.inf, self.sup, self.pairs_found
        )
    }

    pub fn render(&self, format: SummaryFormat) -> Result<String> {
        match format {
            SummaryFormat::Text => Ok(self.line()),
            SummaryFormat::Json => {
                serde_json::to_string(self).context("failed to serialize run summary")
            }
        }
    }

    /// Append this record to `path`, creating the file if needed.
    pub fn append(&self, path: &Path, format: SummaryFormat) -> Result<()> {
        let record = self.render(format)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open summary file {}", path.display()))?;
        writeln!(file, "{}", record)
            .with_context(|| format!("failed to append to summary file {}", path.display()))?;
        Ok(())
    }
}
