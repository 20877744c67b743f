use crate::twap::RankingEntry;

const HEADER: &str = "---------------------\n\
Rank | Outcome Index |    pTwap    | Pool Address\n\
----|--------------|------------|------------------\n";

/// Renders the top-N table printed after a run, preceded by a blank line.
///
/// `requested` is the configured N; `entries` may be shorter.
pub fn render_ranking(entries: &[RankingEntry], requested: usize) -> String {
    let title = format!("\nTop {requested} pools by pTwap:\n{HEADER}");
    entries
        .iter()
        .enumerate()
        .fold(title, |mut out, (i, entry)| {
            out.push_str(&format!(
                " {:2} | {:12} | {:.8} | {}\n",
                i + 1,
                entry.outcome_index,
                entry.p_twap,
                entry.address
            ));
            out
        })
}
