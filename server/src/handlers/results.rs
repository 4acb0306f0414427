//! Results handler - aggregates votes per candidate.

use crate::db::VoteStore;
use crate::error::Result;
use ballot_core::Tally;

/// Fetch the current tally.
pub async fn handle_results(store: &dyn VoteStore) -> Result<Tally> {
    let tally = store.tally().await?;
    tracing::debug!(
        candidates = tally.len(),
        total = tally.total(),
        "Tally computed"
    );
    Ok(tally)
}
