use std::fs;

use anyhow::Context;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub const DEFAULT_OUTPUT_PATH: &str = "twap-results.json";
pub const DEFAULT_TOP_N: usize = 5;

/// What to do when a single pair cannot be priced or mapped.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Log a diagnostic and keep processing the remaining pairs.
    #[default]
    Skip,
    /// Stop the run at the first failing pair; nothing is written.
    Abort,
}

impl FailurePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailurePolicy::Skip => "skip",
            FailurePolicy::Abort => "abort",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RunConfig {
    pub output_path: String,
    /// Rows in the ranking report.
    pub top_n: usize,
    pub on_pair_error: FailurePolicy,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            top_n: DEFAULT_TOP_N,
            on_pair_error: FailurePolicy::default(),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub run: RunConfig,
}

impl AppConfig {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file at {path}"))?;
        let cfg: Self = toml::from_str(&contents)
            .with_context(|| format!("failed to deserialize TOML config at {path}"))?;
        Ok(cfg)
    }
}
