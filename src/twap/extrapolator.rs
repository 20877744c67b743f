//! TWAP extrapolation from two accumulator snapshots.
//!
//! A pair only advances `priceNCumulative` when its state changes, so a read at
//! `blockTimestamp` may be stale by `blockTimestamp - blockTimestampLast`
//! seconds. The accumulator is carried forward over that gap with the spot price
//! implied by the snapshot's reserves, which is exactly what the pair itself
//! would have added on its next update.

use alloy_primitives::{I256, U256};

use super::{PairObservation, Snapshot, SnapshotSide, TwapError, TwapPair, TwapResult};
use crate::utils::{
    math::{q112_ratio, q112_rate},
    time::seconds_between,
};

/// Returns the accumulators of `snapshot` carried forward to its `block_timestamp`.
///
/// With a non-positive discrepancy the stored values are returned unchanged and
/// reserves are not inspected.
pub fn extrapolated_cumulatives(
    snapshot: &Snapshot,
    side: SnapshotSide,
) -> TwapResult<(U256, U256)> {
    let discrepancy = seconds_between(snapshot.block_timestamp, snapshot.block_timestamp_last);
    if discrepancy <= 0 {
        return Ok((snapshot.price0_cumulative, snapshot.price1_cumulative));
    }
    // Positive and bounded by u64::MAX since both timestamps are u64.
    let gap = U256::from(discrepancy as u64);

    let reserve0 = positive_reserve(snapshot.reserve0, side, "reserve0")?;
    let reserve1 = positive_reserve(snapshot.reserve1, side, "reserve1")?;

    let overflow = || TwapError::Overflow { side };
    let instant0 = q112_ratio(reserve1, reserve0).ok_or_else(overflow)?;
    let instant1 = q112_ratio(reserve0, reserve1).ok_or_else(overflow)?;

    let cumulative0 = instant0
        .checked_mul(gap)
        .and_then(|drift| snapshot.price0_cumulative.checked_add(drift))
        .ok_or_else(overflow)?;
    let cumulative1 = instant1
        .checked_mul(gap)
        .and_then(|drift| snapshot.price1_cumulative.checked_add(drift))
        .ok_or_else(overflow)?;

    Ok((cumulative0, cumulative1))
}

fn positive_reserve(value: I256, side: SnapshotSide, field: &'static str) -> TwapResult<U256> {
    if value.is_positive() {
        Ok(value.into_raw())
    } else {
        Err(TwapError::InvalidReserve { side, field, value })
    }
}

/// Time-weighted average prices of a pair between its start and end snapshots.
///
/// A zero-width or inverted window yields `(0, 0)`. Prices that fell over the
/// window produce negative accumulator deltas, which are kept as negative TWAPs.
pub fn extrapolate(observation: &PairObservation) -> TwapResult<TwapPair> {
    let elapsed = seconds_between(
        observation.end.block_timestamp,
        observation.start.block_timestamp,
    );
    // Checked before any reserve is touched: the zero result holds for any snapshot contents.
    if elapsed <= 0 {
        return Ok(TwapPair::default());
    }
    let elapsed = elapsed as u64;

    let (start0, start1) = extrapolated_cumulatives(&observation.start, SnapshotSide::Start)?;
    let (end0, end1) = extrapolated_cumulatives(&observation.end, SnapshotSide::End)?;

    Ok(TwapPair {
        twap0: q112_rate(start0, end0, elapsed),
        twap1: q112_rate(start1, end1, elapsed),
    })
}
