//! Sign-in and sign-out flows
//!
//! Signing in is also the shared setup step: the runner executes it before
//! every flow body, so each flow authenticates independently.

use tracing::info;

use super::selectors;
use super::{FlowContext, FlowOutcome};
use crate::browser::FlowError;

/// Sign in through github.com/login with the configured credentials.
pub async fn sign_in(ctx: &FlowContext) -> Result<(), FlowError> {
    ctx.session.navigate("https://github.com/login").await?;

    let username_field = ctx.locate(&selectors::LOGIN_FIELD).await?;
    ctx.session
        .type_into(&username_field, &ctx.config.username)
        .await?;

    let password_field = ctx.locate(&selectors::PASSWORD_FIELD).await?;
    ctx.session
        .type_into(&password_field, &ctx.config.password)
        .await?;

    let commit = ctx.locate(&selectors::FORM_COMMIT).await?;
    commit
        .click()
        .await
        .map_err(|e| FlowError::Lookup(format!("sign-in submit: {}", e)))?;

    ctx.expect_url_contains("github.com").await?;
    info!("Session {} signed into GitHub", ctx.session.id);
    Ok(())
}

/// Sign out through the user navigation menu and confirm the redirect.
pub async fn sign_out(ctx: &FlowContext) -> Result<FlowOutcome, FlowError> {
    ctx.session.navigate("https://github.com").await?;

    let user_menu = ctx.locate(&selectors::USER_MENU).await?;
    user_menu
        .click()
        .await
        .map_err(|e| FlowError::Lookup(format!("user menu: {}", e)))?;

    let sign_out_link = ctx.locate(&selectors::SIGN_OUT_LINK).await?;
    sign_out_link
        .click()
        .await
        .map_err(|e| FlowError::Lookup(format!("sign out link: {}", e)))?;

    // GitHub interposes a "sign out of all accounts" confirmation form.
    let confirm = ctx.locate(&selectors::FORM_COMMIT).await?;
    confirm
        .click()
        .await
        .map_err(|e| FlowError::Lookup(format!("sign out confirm: {}", e)))?;

    ctx.expect_url_contains("https://github.com/").await?;
    info!("Session {} signed out", ctx.session.id);
    Ok(FlowOutcome::Passed)
}
