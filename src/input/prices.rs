//! Primary dataset: accumulator snapshots per pair at a start and end block.
//!
//! ```json
//! { "startBlock": 1, "endBlock": 2,
//!   "pairs": { "0xPair": { "start": { ...Snapshot }, "end": { ...Snapshot } } } }
//! ```

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use serde_with::serde_as;

use super::{read_json, InputResult};
use crate::twap::PairObservation;
use crate::utils::serde_int::LenientInt;

#[serde_as]
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceDataset {
    #[serde_as(as = "LenientInt")]
    pub start_block: u64,
    #[serde_as(as = "LenientInt")]
    pub end_block: u64,
    /// Keyed by pair address as written in the document; document order is kept.
    pub pairs: IndexMap<String, PairObservation>,
}

pub fn parse_prices(json: &str) -> serde_json::Result<PriceDataset> {
    serde_json::from_str(json)
}

pub fn load_prices(path: &Path) -> InputResult<PriceDataset> {
    read_json(path)
}
