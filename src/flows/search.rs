//! Header search flow

use tracing::info;

use super::selectors;
use super::{FlowContext, FlowOutcome};
use crate::browser::FlowError;

/// Open the header search box, submit the configured query, and assert a
/// non-empty result list.
pub async fn search_repositories(ctx: &FlowContext) -> Result<FlowOutcome, FlowError> {
    ctx.session.navigate("https://github.com").await?;

    let open_search = ctx.locate(&selectors::SEARCH_OPEN).await?;
    open_search
        .click()
        .await
        .map_err(|e| FlowError::Lookup(format!("open search: {}", e)))?;

    let search_box = ctx.locate(&selectors::SEARCH_INPUT).await?;
    ctx.session
        .type_into(&search_box, &ctx.config.search_query)
        .await?;
    search_box
        .press_key("Enter")
        .await
        .map_err(|e| FlowError::Lookup(format!("submit search: {}", e)))?;

    let results = ctx.locate_some(&selectors::SEARCH_RESULTS).await?;

    info!(
        "Session {} search for `{}` returned {} results:",
        ctx.session.id,
        ctx.config.search_query,
        results.len()
    );
    for result in &results {
        if let Ok(Some(text)) = result.inner_text().await {
            if let Some(first_line) = text.lines().next() {
                info!("  {}", first_line.trim());
            }
        }
    }

    Ok(FlowOutcome::Passed)
}
