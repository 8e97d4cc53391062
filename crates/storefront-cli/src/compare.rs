//! `compare` command handler.

use storefront_session::{CandidateOutcome, ComparisonSession, Storefront};

/// Stages each product, opens the comparison and prints its cards, then
/// closes the session so the scratch cache is left clean.
///
/// # Errors
///
/// Returns an error if the comparison products cannot be loaded or the
/// cards cannot be serialized.
pub(crate) async fn run_compare(storefront: &Storefront, product_ids: &[String]) -> anyhow::Result<()> {
    let session = storefront.comparison();

    for product_id in product_ids {
        let outcome = session.add_candidate(product_id).await;
        if outcome != CandidateOutcome::Added {
            eprintln!("{product_id}: {outcome:?}");
        }
    }

    let result = open_and_print(session).await;
    session.close().await;
    result
}

async fn open_and_print(session: &ComparisonSession) -> anyhow::Result<()> {
    let count = session.open().await?;
    tracing::info!(count, "comparison opened");
    let cards = session.cards().await;
    println!("{}", serde_json::to_string_pretty(&cards)?);
    Ok(())
}
