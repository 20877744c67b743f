use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::{
    input::PriceDataset,
    twap::{
        extrapolate, map_market, top_ranked, MarketBook, PairObservation, PairResult,
        RankingEntry, TwapError,
    },
    types::FailurePolicy,
};

/// Persisted artifact of a run.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputationResult {
    pub start_block: u64,
    /// Start timestamp of the first pair in input order, not a minimum over pairs.
    pub start_block_time: Option<u64>,
    pub end_block: u64,
    /// End timestamp of the first pair in input order, not a maximum over pairs.
    pub end_block_time: Option<u64>,
    pub pairs: IndexMap<String, PairResult>,
}

/// A pair-level failure tolerated under [`FailurePolicy::Skip`].
#[derive(Clone, Debug, PartialEq)]
pub struct PairDiagnostic {
    pub address: String,
    pub error: TwapError,
    /// Whether the pair still appears in the output (with its plain TWAPs only).
    pub kept: bool,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("pair {address}: {source}")]
    Pair {
        address: String,
        #[source]
        source: TwapError,
    },
}

/// Everything one pass over the inputs produces.
#[derive(Clone, Debug)]
pub struct RunOutcome {
    pub result: ComputationResult,
    /// One entry per mapped pair, in input order.
    pub ranking: Vec<RankingEntry>,
    pub diagnostics: Vec<PairDiagnostic>,
}

impl RunOutcome {
    fn empty(prices: &PriceDataset) -> Self {
        let first = prices.pairs.values().next();
        Self {
            result: ComputationResult {
                start_block: prices.start_block,
                start_block_time: first.map(|obs| obs.start.block_timestamp),
                end_block: prices.end_block,
                end_block_time: first.map(|obs| obs.end.block_timestamp),
                pairs: IndexMap::new(),
            },
            ranking: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Highest-scoring `n` mapped pairs.
    pub fn top(&self, n: usize) -> Vec<RankingEntry> {
        top_ranked(&self.ranking, n)
    }

    fn absorb(
        mut self,
        address: &str,
        observation: &PairObservation,
        book: &MarketBook,
        policy: FailurePolicy,
    ) -> Result<Self, EngineError> {
        let twap = match extrapolate(observation) {
            Ok(twap) => twap,
            Err(error) => return self.reject(address, error, false, policy),
        };

        let pair = match map_market(address, twap, book) {
            Ok(pair) => pair,
            Err(error) => {
                let mut outcome = self.reject(address, error, true, policy)?;
                outcome
                    .result
                    .pairs
                    .insert(address.to_string(), PairResult::unmapped(twap));
                return Ok(outcome);
            }
        };

        if let (Some(outcome_index), Some(p_twap)) = (pair.outcome_index, pair.p_twap) {
            self.ranking.push(RankingEntry {
                address: address.to_string(),
                outcome_index,
                p_twap,
            });
        }
        self.result.pairs.insert(address.to_string(), pair);
        Ok(self)
    }

    fn reject(
        mut self,
        address: &str,
        error: TwapError,
        kept: bool,
        policy: FailurePolicy,
    ) -> Result<Self, EngineError> {
        match policy {
            FailurePolicy::Abort => Err(EngineError::Pair {
                address: address.to_string(),
                source: error,
            }),
            FailurePolicy::Skip => {
                warn!(
                    target: "twap",
                    pair = %address,
                    error = %error,
                    kept,
                    "pair failed"
                );
                self.diagnostics.push(PairDiagnostic {
                    address: address.to_string(),
                    error,
                    kept,
                });
                Ok(self)
            }
        }
    }
}

/// Prices every pair of `prices` and labels those known to `book`.
///
/// Pure apart from diagnostics logging: pairs are folded in input order into a
/// fresh [`RunOutcome`], so repeated calls with the same inputs agree exactly.
pub fn compute_twaps(
    prices: &PriceDataset,
    book: &MarketBook,
    policy: FailurePolicy,
) -> Result<RunOutcome, EngineError> {
    prices
        .pairs
        .iter()
        .try_fold(RunOutcome::empty(prices), |outcome, (address, observation)| {
            outcome.absorb(address, observation, book, policy)
        })
}
