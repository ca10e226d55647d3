//! Explore page flow

use super::selectors;
use super::{FlowContext, FlowOutcome};
use crate::browser::FlowError;

/// The explore page loads and its header mentions interests.
pub async fn explore_loads(ctx: &FlowContext) -> Result<FlowOutcome, FlowError> {
    ctx.session.navigate("https://github.com/explore").await?;

    let heading = ctx.locate(&selectors::EXPLORE_HEADING).await?;
    let text = heading
        .inner_text()
        .await
        .map_err(|e| FlowError::Lookup(format!("explore heading: {}", e)))?
        .unwrap_or_default();

    if !text.contains("interests") {
        return Err(FlowError::Assertion(format!(
            "explore heading reads `{}`",
            text.trim()
        )));
    }

    Ok(FlowOutcome::Passed)
}
