use serde::Serialize;

/// A mapped pair's score, used only to build the top-N report.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingEntry {
    pub address: String,
    pub outcome_index: i64,
    pub p_twap: f64,
}

/// Highest `n` entries by pTwap, descending. Equal scores keep input order.
pub fn top_ranked(entries: &[RankingEntry], n: usize) -> Vec<RankingEntry> {
    let mut ranked = entries.to_vec();
    // sort_by is stable
    ranked.sort_by(|a, b| b.p_twap.total_cmp(&a.p_twap));
    ranked.truncate(n);
    ranked
}
