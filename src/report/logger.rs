use serde::Serialize;
use tracing::info;

use crate::engine::{RunInputs, RunOutcome};
use crate::types::RunConfig;
use crate::utils::time::format_block_time;

#[derive(Serialize)]
struct StartupLog<'a> {
    event: &'a str,
    prices: String,
    markets: String,
    output: &'a str,
    on_pair_error: &'a str,
    top_n: usize,
}

pub fn log_startup(inputs: &RunInputs, cfg: &RunConfig) {
    let payload = StartupLog {
        event: "startup",
        prices: inputs.prices_path.display().to_string(),
        markets: inputs.markets_path.display().to_string(),
        output: &cfg.output_path,
        on_pair_error: cfg.on_pair_error.as_str(),
        top_n: cfg.top_n,
    };
    info!(target: "twap", startup = serde_json::to_string(&payload).unwrap_or_default().as_str());
}

#[derive(Serialize)]
struct RunSummary<'a> {
    event: &'a str,
    start_block: u64,
    end_block: u64,
    window_start: String,
    window_end: String,
    pairs_written: usize,
    pairs_mapped: usize,
    pairs_failed: usize,
    pairs_dropped: usize,
}

pub fn log_summary(outcome: &RunOutcome) {
    let result = &outcome.result;
    let summary = RunSummary {
        event: "twap_summary",
        start_block: result.start_block,
        end_block: result.end_block,
        window_start: format_block_time(result.start_block_time),
        window_end: format_block_time(result.end_block_time),
        pairs_written: result.pairs.len(),
        pairs_mapped: outcome.ranking.len(),
        pairs_failed: outcome.diagnostics.len(),
        pairs_dropped: outcome.diagnostics.iter().filter(|d| !d.kept).count(),
    };

    let payload = serde_json::to_string(&summary)
        .unwrap_or_else(|_| "{\"event\":\"twap_summary_error\"}".to_string());
    info!(target: "twap", "{payload}");
}
