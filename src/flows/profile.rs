//! Profile and settings flows

use tracing::info;

use super::selectors;
use super::{FlowContext, FlowOutcome};
use crate::browser::FlowError;

/// The profile page shows the account's name block.
pub async fn profile_visible(ctx: &FlowContext) -> Result<FlowOutcome, FlowError> {
    ctx.session.navigate(&ctx.config.profile_url()).await?;

    let name_block = ctx.locate(&selectors::VCARD_NAMES).await?;
    ctx.expect_displayed(&name_block, "profile name block").await?;

    info!("Session {} profile page checked", ctx.session.id);
    Ok(FlowOutcome::Passed)
}

/// Rewrite the profile bio, save, reload, and assert the value persisted.
pub async fn update_bio(ctx: &FlowContext) -> Result<FlowOutcome, FlowError> {
    ctx.session
        .navigate("https://github.com/settings/profile")
        .await?;

    let bio_field = ctx.locate(&selectors::BIO_FIELD).await?;
    ctx.session.clear(&bio_field).await?;
    ctx.session.type_into(&bio_field, &ctx.config.bio).await?;

    let save = ctx.locate(&selectors::SAVE_PROFILE).await?;
    save.click()
        .await
        .map_err(|e| FlowError::Lookup(format!("save profile: {}", e)))?;

    ctx.session.reload().await?;

    // Re-resolve after the reload; the old node is gone.
    let bio_field = ctx.locate(&selectors::BIO_FIELD).await?;
    let saved = ctx.session.field_value(&bio_field).await?;

    if saved.trim() != ctx.config.bio {
        return Err(FlowError::Assertion(format!(
            "bio did not persist: expected `{}`, found `{}`",
            ctx.config.bio, saved
        )));
    }

    info!("Session {} profile bio updated", ctx.session.id);
    Ok(FlowOutcome::Passed)
}

/// The settings page exposes the public-profile heading.
pub async fn user_settings_accessible(ctx: &FlowContext) -> Result<FlowOutcome, FlowError> {
    ctx.session
        .navigate("https://github.com/settings/profile")
        .await?;

    let heading = ctx.locate(&selectors::SETTINGS_HEADING).await?;
    ctx.expect_displayed(&heading, "settings heading").await?;

    Ok(FlowOutcome::Passed)
}

/// The yearly contributions graph renders on the profile page.
pub async fn contributions_graph_visible(ctx: &FlowContext) -> Result<FlowOutcome, FlowError> {
    ctx.session.navigate(&ctx.config.profile_url()).await?;

    let graph = ctx.locate(&selectors::CONTRIBUTIONS_GRAPH).await?;
    ctx.expect_displayed(&graph, "contributions graph").await?;

    Ok(FlowOutcome::Passed)
}
