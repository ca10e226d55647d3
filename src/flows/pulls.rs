//! Pull-requests page flow

use super::selectors;
use super::{FlowContext, FlowOutcome};
use crate::browser::FlowError;

/// The repository's pulls page is accessible.
pub async fn pull_requests_accessible(ctx: &FlowContext) -> Result<FlowOutcome, FlowError> {
    ctx.session.navigate(&ctx.config.pulls_url()).await?;

    let icon = ctx.locate(&selectors::PULLS_ICON).await?;
    ctx.expect_displayed(&icon, "pull request icon").await?;

    Ok(FlowOutcome::Passed)
}
