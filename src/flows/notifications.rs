//! Notifications flow
//!
//! Zero notifications is a valid account state, not a failure: the flow
//! records it as an explicit skip-pass instead of waiting out the timeout.

use tracing::info;

use super::selectors;
use super::{FlowContext, FlowOutcome};
use crate::browser::FlowError;

pub async fn check_notifications(ctx: &FlowContext) -> Result<FlowOutcome, FlowError> {
    ctx.session
        .navigate("https://github.com/notifications")
        .await?;

    let notifications = ctx
        .session
        .find_all(&selectors::NOTIFICATION_ITEMS)
        .await?;

    if notifications.is_empty() {
        info!("Session {} has no notifications", ctx.session.id);
        return Ok(FlowOutcome::Skipped("no notifications to check".into()));
    }

    info!(
        "Session {} found {} notifications",
        ctx.session.id,
        notifications.len()
    );
    Ok(FlowOutcome::Passed)
}
