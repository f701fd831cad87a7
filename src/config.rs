//! # Config — TOML Settings File
//!
//! Optional settings file layered under the command line. Every field has a
//! default, so an empty or partial file is valid. Resolution order, highest
//! first: CLI flag, environment variable (via clap `env`), settings file,
//! built-in default.
//!
//! ```toml
//! [output]
//! results = "output.txt"
//! summary = "resumes.txt"
//! summary_format = "text"   # or "json"
//!
//! [sieve]
//! threads = 0               # 0 = all logical cores
//!
//! [progress]
//! interval_secs = 30        # 0 disables the reporter
//!
//! [verify]
//! enabled = false
//! mr_rounds = 15
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::summary::SummaryFormat;

/// Settings file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "twinsieve.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub sieve: SieveConfig,
    #[serde(default)]
    pub progress: ProgressConfig,
    #[serde(default)]
    pub verify: VerifyConfig,
}

/// The `[output]` section: where results and run statistics go.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default = "default_results")]
    pub results: PathBuf,
    #[serde(default = "default_summary")]
    pub summary: PathBuf,
    #[serde(default)]
    pub summary_format: SummaryFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            results: default_results(),
            summary: default_summary(),
            summary_format: SummaryFormat::default(),
        }
    }
}

fn default_results() -> PathBuf {
    PathBuf::from("output.txt")
}

fn default_summary() -> PathBuf {
    PathBuf::from("resumes.txt")
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SieveConfig {
    #[serde(default)]
    pub threads: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProgressConfig {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        ProgressConfig {
            interval_secs: default_interval_secs(),
        }
    }
}

fn default_interval_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VerifyConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_mr_rounds")]
    pub mr_rounds: u32,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        VerifyConfig {
            enabled: false,
            mr_rounds: default_mr_rounds(),
        }
    }
}

fn default_mr_rounds() -> u32 {
    15
}

impl Settings {
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid settings file")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Load an explicit settings file, or `twinsieve.toml` if it exists, or defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::from_file(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}
