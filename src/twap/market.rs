use std::collections::HashMap;

use serde::Serialize;

use super::{TwapError, TwapPair, TwapResult};

/// Long/short labelling of a pair's two tokens for one market outcome.
///
/// `new` stores addresses lower-cased; orientation compares them ignoring case.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenMapping {
    pub token0: String,
    pub token1: String,
    pub long_token: String,
    pub short_token: String,
    /// Opaque outcome label, passed through untouched.
    pub outcome_index: i64,
}

impl TokenMapping {
    pub fn new(
        token0: &str,
        token1: &str,
        long_token: &str,
        short_token: &str,
        outcome_index: i64,
    ) -> Self {
        Self {
            token0: token0.to_lowercase(),
            token1: token1.to_lowercase(),
            long_token: long_token.to_lowercase(),
            short_token: short_token.to_lowercase(),
            outcome_index,
        }
    }

    /// Splits a pair's TWAPs into `(short, long)` prices.
    pub fn orient(&self, twap: TwapPair) -> TwapResult<(f64, f64)> {
        if self.token0.eq_ignore_ascii_case(&self.short_token) {
            Ok((twap.twap0, twap.twap1))
        } else if self.token1.eq_ignore_ascii_case(&self.short_token) {
            Ok((twap.twap1, twap.twap0))
        } else {
            Err(TwapError::OrientationMismatch {
                token0: self.token0.clone(),
                token1: self.token1.clone(),
                short_token: self.short_token.clone(),
            })
        }
    }
}

/// Token mappings keyed by lower-cased pair address.
#[derive(Clone, Debug, Default)]
pub struct MarketBook {
    by_pair: HashMap<String, TokenMapping>,
}

impl MarketBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a mapping, replacing any earlier one for the same pair.
    pub fn insert(&mut self, pair_address: &str, mapping: TokenMapping) -> Option<TokenMapping> {
        self.by_pair.insert(pair_address.to_lowercase(), mapping)
    }

    /// Case-insensitive lookup.
    pub fn get(&self, pair_address: &str) -> Option<&TokenMapping> {
        self.by_pair.get(&pair_address.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.by_pair.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_pair.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<(S, TokenMapping)> for MarketBook {
    fn from_iter<I: IntoIterator<Item = (S, TokenMapping)>>(iter: I) -> Self {
        let mut book = MarketBook::new();
        for (pair, mapping) in iter {
            book.insert(pair.as_ref(), mapping);
        }
        book
    }
}

/// Per-pair output record. Market fields are present only for mapped pairs.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairResult {
    pub price0_twap: f64,
    pub price1_twap: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome_index: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_short_twap: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_long_twap: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p_twap: Option<f64>,
}

impl PairResult {
    /// Result for a pair with no known market.
    pub fn unmapped(twap: TwapPair) -> Self {
        Self {
            price0_twap: twap.twap0,
            price1_twap: twap.twap1,
            outcome_index: None,
            price_short_twap: None,
            price_long_twap: None,
            p_twap: None,
        }
    }
}

/// Squashes a long-token price into a comparable score: `long / (1 + long)`.
///
/// Not clamped. Negative or extreme inputs give values outside `[0, 1]`.
pub fn p_twap(price_long_twap: f64) -> f64 {
    price_long_twap / (1.0 + price_long_twap)
}

/// Attaches long/short prices and pTwap to a pair's TWAPs when `book` knows the pair.
pub fn map_market(pair_address: &str, twap: TwapPair, book: &MarketBook) -> TwapResult<PairResult> {
    let Some(mapping) = book.get(pair_address) else {
        return Ok(PairResult::unmapped(twap));
    };
    let (short, long) = mapping.orient(twap)?;
    Ok(PairResult {
        outcome_index: Some(mapping.outcome_index),
        price_short_twap: Some(short),
        price_long_twap: Some(long),
        p_twap: Some(p_twap(long)),
        ..PairResult::unmapped(twap)
    })
}
