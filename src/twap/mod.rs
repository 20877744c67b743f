use alloy_primitives::{I256, U256};
use serde::Deserialize;
use serde_with::serde_as;
use thiserror::Error;

use crate::utils::serde_int::LenientInt;

pub mod extrapolator;
pub mod market;
pub mod ranking;

pub use extrapolator::{extrapolate, extrapolated_cumulatives};
pub use market::{map_market, p_twap, MarketBook, PairResult, TokenMapping};
pub use ranking::{top_ranked, RankingEntry};

/// One read of a constant-product pair's price accumulators at a given block.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Timestamp of the block the snapshot was queried at.
    #[serde_as(as = "LenientInt")]
    pub block_timestamp: u64,
    /// Timestamp at which the pair last updated its accumulators on-chain.
    #[serde_as(as = "LenientInt")]
    pub block_timestamp_last: u64,
    /// UQ112 accumulator of token1-per-token0.
    #[serde_as(as = "LenientInt")]
    pub price0_cumulative: U256,
    /// UQ112 accumulator of token0-per-token1.
    #[serde_as(as = "LenientInt")]
    pub price1_cumulative: U256,
    #[serde_as(as = "LenientInt")]
    pub reserve0: I256,
    #[serde_as(as = "LenientInt")]
    pub reserve1: I256,
}

/// Start and end snapshots for a single pair.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct PairObservation {
    pub start: Snapshot,
    pub end: Snapshot,
}

/// Time-weighted average prices for both quote directions of a pair.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TwapPair {
    /// Average token1-per-token0 price.
    pub twap0: f64,
    /// Average token0-per-token1 price.
    pub twap1: f64,
}

/// Which snapshot of an observation an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnapshotSide {
    Start,
    End,
}

impl std::fmt::Display for SnapshotSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotSide::Start => f.write_str("start"),
            SnapshotSide::End => f.write_str("end"),
        }
    }
}

/// Per-pair failures. None of these abort a run on their own; the engine's
/// failure policy decides.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TwapError {
    #[error("{side} snapshot has non-positive {field}: {value}")]
    InvalidReserve {
        side: SnapshotSide,
        field: &'static str,
        value: I256,
    },

    #[error("accumulator extrapolation overflowed 256 bits at {side} snapshot")]
    Overflow { side: SnapshotSide },

    #[error("short token {short_token} is neither token0 {token0} nor token1 {token1}")]
    OrientationMismatch {
        token0: String,
        token1: String,
        short_token: String,
    },
}

pub type TwapResult<T> = Result<T, TwapError>;
