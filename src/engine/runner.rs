use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::info;

use crate::{
    engine::core::{compute_twaps, RunOutcome},
    input::{load_markets, load_prices},
    report::{logger, render_ranking},
    storage::write_results,
    types::RunConfig,
};

/// Locations of the two input documents.
#[derive(Clone, Debug)]
pub struct RunInputs {
    pub prices_path: PathBuf,
    pub markets_path: PathBuf,
}

/// Load both inputs, price every pair, write the result document and print the ranking.
///
/// Any input or (under `abort`) pair error returns before the output file is touched.
pub fn run(inputs: &RunInputs, cfg: &RunConfig) -> anyhow::Result<RunOutcome> {
    logger::log_startup(inputs, cfg);

    let prices = load_prices(&inputs.prices_path)?;
    let book = load_markets(&inputs.markets_path)?;
    info!(
        target: "twap",
        pairs = prices.pairs.len(),
        markets = book.len(),
        start_block = prices.start_block,
        end_block = prices.end_block,
        "inputs loaded"
    );

    let outcome = compute_twaps(&prices, &book, cfg.on_pair_error)
        .context("aborting run on pair error")?;

    let output = Path::new(&cfg.output_path);
    write_results(output, &outcome.result)?;
    info!(target: "twap", output = %output.display(), "results written");
    println!("Results written to {}", output.display());

    logger::log_summary(&outcome);
    print!("{}", render_ranking(&outcome.top(cfg.top_n), cfg.top_n));

    Ok(outcome)
}
