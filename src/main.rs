use std::path::PathBuf;

use clap::Parser;
use dotenv::dotenv;
use tracing_subscriber::EnvFilter;

use twap_calculator::{
    engine::{self, RunInputs},
    types::{AppConfig, FailurePolicy},
};

#[derive(Parser, Debug)]
#[command(name = "twap-calculator")]
#[command(
    about = "Extrapolated TWAPs and long/short pricing for conditional scalar market pairs",
    long_about = None
)]
struct Cli {
    /// Accumulator snapshots per pair (startBlock, endBlock, pairs)
    prices_json: PathBuf,

    /// Conditional scalar markets (data.conditionalScalarMarkets)
    csms_json: PathBuf,

    /// Where to write the results [default: twap-results.json]
    output_json: Option<String>,

    /// Optional TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Override the pair failure policy (skip/abort)
    #[arg(long)]
    on_pair_error: Option<FailurePolicy>,

    /// Override the number of ranking rows
    #[arg(long)]
    top: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    dotenv().ok();

    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "twap_calculator=info,twap=info,warn");
    }
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => {
            tracing::debug!(target: "twap", config = %path, "loading config");
            AppConfig::from_file(path)?
        }
        None => AppConfig::default(),
    };

    if let Some(output) = cli.output_json {
        settings.run.output_path = output;
    }
    if let Some(policy) = cli.on_pair_error {
        settings.run.on_pair_error = policy;
    }
    if let Some(top) = cli.top {
        settings.run.top_n = top;
    }

    let inputs = RunInputs {
        prices_path: cli.prices_json,
        markets_path: cli.csms_json,
    };
    engine::run(&inputs, &settings.run)?;

    Ok(())
}
