//! Auxiliary dataset: conditional scalar markets as returned by the subgraph.
//!
//! Only `data.conditionalScalarMarkets[*]` is read; each row names a pair, its
//! two tokens, which of them is long/short, and the outcome index.

use std::path::Path;

use serde::Deserialize;
use serde_with::serde_as;

use super::{read_json, InputResult};
use crate::twap::{MarketBook, TokenMapping};
use crate::utils::serde_int::LenientInt;

#[derive(Debug, Deserialize)]
struct MarketsResponse {
    data: MarketsData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MarketsData {
    conditional_scalar_markets: Vec<MarketRow>,
}

#[serde_as]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MarketRow {
    pair: PairRow,
    long_token: EntityRef,
    short_token: EntityRef,
    #[serde_as(as = "LenientInt")]
    outcome_index: i64,
}

#[derive(Debug, Deserialize)]
struct PairRow {
    id: String,
    token0: EntityRef,
    token1: EntityRef,
}

#[derive(Debug, Deserialize)]
struct EntityRef {
    id: String,
}

impl MarketsResponse {
    fn into_book(self) -> MarketBook {
        self.data
            .conditional_scalar_markets
            .into_iter()
            .map(|row| {
                let mapping = TokenMapping::new(
                    &row.pair.token0.id,
                    &row.pair.token1.id,
                    &row.long_token.id,
                    &row.short_token.id,
                    row.outcome_index,
                );
                (row.pair.id, mapping)
            })
            .collect()
    }
}

pub fn parse_markets(json: &str) -> serde_json::Result<MarketBook> {
    serde_json::from_str::<MarketsResponse>(json).map(MarketsResponse::into_book)
}

pub fn load_markets(path: &Path) -> InputResult<MarketBook> {
    read_json::<MarketsResponse>(path).map(MarketsResponse::into_book)
}
