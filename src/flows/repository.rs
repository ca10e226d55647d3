//! Repository flows: listing, creation, starring, forking

use tracing::info;

use super::selectors;
use super::{FlowContext, FlowOutcome};
use crate::browser::FlowError;

/// The account's repository tab lists at least one repository.
pub async fn list_repositories(ctx: &FlowContext) -> Result<FlowOutcome, FlowError> {
    ctx.session.navigate(&ctx.config.repositories_url()).await?;

    let repo_links = ctx.locate_some(&selectors::REPO_LIST_LINKS).await?;

    info!(
        "Session {} found {} repositories:",
        ctx.session.id,
        repo_links.len()
    );
    for link in &repo_links {
        if let Ok(Some(name)) = link.inner_text().await {
            info!("  {}", name.trim());
        }
    }

    Ok(FlowOutcome::Passed)
}

/// Create a repository with a unique per-run name and land on its page.
///
/// The name carries a random suffix so repeated or overlapping runs never
/// collide with a repository left behind by an earlier run.
pub async fn create_repository(ctx: &FlowContext) -> Result<FlowOutcome, FlowError> {
    let repo_name = ctx.config.unique_repository_name();

    ctx.session.navigate("https://github.com/new").await?;

    let name_input = ctx.locate(&selectors::REPO_NAME_INPUT).await?;
    ctx.session.type_into(&name_input, &repo_name).await?;

    let description = ctx.locate(&selectors::REPO_DESCRIPTION).await?;
    ctx.session
        .type_into(
            &description,
            "This is a test repository created via automated UI flows.",
        )
        .await?;

    let submit = ctx.locate(&selectors::CREATE_REPO_SUBMIT).await?;
    submit
        .click()
        .await
        .map_err(|e| FlowError::Lookup(format!("create repository submit: {}", e)))?;

    ctx.expect_url_contains(&format!(
        "github.com/{}/{}",
        ctx.config.username, repo_name
    ))
    .await?;

    info!(
        "Session {} created repository {}",
        ctx.session.id, repo_name
    );
    Ok(FlowOutcome::Passed)
}

/// Toggle the star on the configured repository and assert it reads Starred.
pub async fn star_repository(ctx: &FlowContext) -> Result<FlowOutcome, FlowError> {
    let url = ctx.config.repository_url(&ctx.config.repository);
    ctx.session.navigate(&url).await?;

    let toggle = ctx.locate(&selectors::STAR_TOGGLE).await?;
    let label = toggle
        .inner_text()
        .await
        .map_err(|e| FlowError::Lookup(format!("star label: {}", e)))?
        .unwrap_or_default();

    if !label.contains("Starred") {
        let star = ctx.locate(&selectors::STAR_BUTTON).await?;
        star.click()
            .await
            .map_err(|e| FlowError::Lookup(format!("star button: {}", e)))?;
        info!("Session {} starred {}", ctx.session.id, url);
    } else {
        info!("Session {} repository already starred", ctx.session.id);
    }

    // The toggle swaps out after clicking; re-resolve until it reads Starred.
    ctx.wait
        .until(|| async {
            let toggle = ctx.session.find(&selectors::STAR_TOGGLE).await?;
            let label = toggle
                .inner_text()
                .await
                .map_err(|e| FlowError::Lookup(format!("star label: {}", e)))?
                .unwrap_or_default();
            if label.contains("Starred") {
                Ok(())
            } else {
                Err(FlowError::Assertion(format!(
                    "star toggle reads `{}`",
                    label.trim()
                )))
            }
        })
        .await?;

    Ok(FlowOutcome::Passed)
}

/// Fork a third-party repository into the test account's namespace.
pub async fn fork_repository(ctx: &FlowContext) -> Result<FlowOutcome, FlowError> {
    ctx.session.navigate(&ctx.config.fork_source_url()).await?;

    let fork = ctx.locate(&selectors::FORK_BUTTON).await?;
    fork.click()
        .await
        .map_err(|e| FlowError::Lookup(format!("fork button: {}", e)))?;

    // Forking redirects to <username>/<repo> once GitHub finishes copying.
    ctx.expect_url_contains(&ctx.config.fork_result_fragment())
        .await?;

    info!(
        "Session {} forked {} into {}",
        ctx.session.id,
        ctx.config.fork_source,
        ctx.config.fork_result_fragment()
    );
    Ok(FlowOutcome::Passed)
}
