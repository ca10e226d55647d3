//! GitHub user-journey flows
//!
//! Each flow is a linear navigate → locate → act → assert script executed
//! against a fresh browser session. Flows never share state: signing in is an
//! explicit setup step run at the start of every flow, so two flow runs
//! always produce two independent login attempts.

pub mod explore;
pub mod login;
pub mod notifications;
pub mod profile;
pub mod pulls;
pub mod repository;
pub mod search;
pub mod selectors;

use std::time::{Duration, Instant};

use chromiumoxide::Element;
use tracing::{info, warn};

use crate::browser::{BrowserSession, BrowserSessionConfig, FlowError, Locator, WaitPolicy};
use crate::Config;

/// Every flow the harness knows, in the order the runner executes them.
pub const FLOW_NAMES: &[&str] = &[
    "login",
    "profile",
    "repositories",
    "update-bio",
    "create-repository",
    "star-repository",
    "fork-repository",
    "search",
    "notifications",
    "user-settings",
    "contributions",
    "pull-requests",
    "explore",
    "logout",
];

/// How a flow ended when no error was raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowOutcome {
    Passed,
    /// The flow had no applicable data (e.g. zero notifications) and records
    /// the empty state as a pass.
    Skipped(String),
}

/// Result of one flow run, as handed to the reporter.
#[derive(Debug)]
pub struct FlowReport {
    pub name: String,
    pub outcome: Result<FlowOutcome, FlowError>,
    pub elapsed: Duration,
}

impl FlowReport {
    pub fn passed(&self) -> bool {
        matches!(self.outcome, Ok(FlowOutcome::Passed))
    }

    pub fn skipped(&self) -> bool {
        matches!(self.outcome, Ok(FlowOutcome::Skipped(_)))
    }

    pub fn failed(&self) -> bool {
        self.outcome.is_err()
    }
}

/// Aggregate counts over a set of flow reports.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub passed: usize,
    pub skipped: usize,
    pub failed: usize,
}

pub fn summarize(reports: &[FlowReport]) -> Summary {
    let mut summary = Summary::default();
    for report in reports {
        if report.failed() {
            summary.failed += 1;
        } else if report.skipped() {
            summary.skipped += 1;
        } else {
            summary.passed += 1;
        }
    }
    summary
}

/// Per-flow execution context: one exclusively-owned browser session plus the
/// wait policy and config shared by every step of the flow. Never reused
/// across flows.
pub struct FlowContext {
    pub session: BrowserSession,
    pub wait: WaitPolicy,
    pub config: Config,
}

impl FlowContext {
    /// Launch a fresh browser session for one flow.
    pub async fn start(config: &Config) -> Result<Self, FlowError> {
        let session_id = uuid::Uuid::new_v4().to_string();
        let session_config = BrowserSessionConfig::for_session(&session_id)
            .headless(config.headless)
            .chrome_path(config.chrome_path.clone());
        let session = BrowserSession::new(session_config).await?;

        Ok(Self {
            session,
            wait: config.wait_policy(),
            config: config.clone(),
        })
    }

    /// Resolve a locator through the wait policy: retry until an element is
    /// attached or the wait budget runs out.
    pub async fn locate(&self, locator: &Locator) -> Result<Element, FlowError> {
        self.wait.until(|| self.session.find(locator)).await
    }

    /// Resolve a locator to a non-empty element set through the wait policy.
    pub async fn locate_some(&self, locator: &Locator) -> Result<Vec<Element>, FlowError> {
        self.wait
            .until(|| async {
                let elements = self.session.find_all(locator).await?;
                if elements.is_empty() {
                    Err(FlowError::Lookup(format!("no matches yet for {}", locator)))
                } else {
                    Ok(elements)
                }
            })
            .await
    }

    /// Wait until the current address contains `needle`.
    pub async fn expect_url_contains(&self, needle: &str) -> Result<(), FlowError> {
        self.wait
            .until(|| async {
                let url = self.session.current_url().await?;
                if url.contains(needle) {
                    Ok(())
                } else {
                    Err(FlowError::Assertion(format!(
                        "current url `{}` does not contain `{}`",
                        url, needle
                    )))
                }
            })
            .await
    }

    /// Assert that an element is visible on the page.
    pub async fn expect_displayed(&self, element: &Element, what: &str) -> Result<(), FlowError> {
        if self.session.is_displayed(element).await? {
            Ok(())
        } else {
            Err(FlowError::Assertion(format!("{} is not visible", what)))
        }
    }
}

/// Run one named flow start to finish: fresh session, explicit sign-in setup
/// step, flow body, unconditional teardown.
pub async fn run(name: &str, config: &Config) -> FlowReport {
    let started = Instant::now();
    let outcome = run_inner(name, config).await;
    FlowReport {
        name: name.to_string(),
        outcome,
        elapsed: started.elapsed(),
    }
}

async fn run_inner(name: &str, config: &Config) -> Result<FlowOutcome, FlowError> {
    let mut ctx = FlowContext::start(config).await?;
    let outcome = dispatch(name, &ctx).await;

    // Teardown is unconditional so a failed step never leaks a browser
    // process; its own errors must not mask the flow result.
    if let Err(e) = ctx.session.close().await {
        warn!("Session teardown after flow `{}` reported: {}", name, e);
    }

    outcome
}

async fn dispatch(name: &str, ctx: &FlowContext) -> Result<FlowOutcome, FlowError> {
    // Shared setup: every flow starts from an authenticated page.
    login::sign_in(ctx).await?;
    info!("Flow `{}` signed in, executing body", name);

    match name {
        // Signing in was the whole body.
        "login" => Ok(FlowOutcome::Passed),
        "profile" => profile::profile_visible(ctx).await,
        "repositories" => repository::list_repositories(ctx).await,
        "update-bio" => profile::update_bio(ctx).await,
        "create-repository" => repository::create_repository(ctx).await,
        "star-repository" => repository::star_repository(ctx).await,
        "fork-repository" => repository::fork_repository(ctx).await,
        "search" => search::search_repositories(ctx).await,
        "notifications" => notifications::check_notifications(ctx).await,
        "user-settings" => profile::user_settings_accessible(ctx).await,
        "contributions" => profile::contributions_graph_visible(ctx).await,
        "pull-requests" => pulls::pull_requests_accessible(ctx).await,
        "explore" => explore::explore_loads(ctx).await,
        "logout" => login::sign_out(ctx).await,
        other => Err(FlowError::Assertion(format!("unknown flow `{}`", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flow_names_are_unique() {
        let mut names: Vec<_> = FLOW_NAMES.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), FLOW_NAMES.len());
    }

    #[test]
    fn test_summary_counts_outcomes() {
        let reports = vec![
            FlowReport {
                name: "a".into(),
                outcome: Ok(FlowOutcome::Passed),
                elapsed: Duration::ZERO,
            },
            FlowReport {
                name: "b".into(),
                outcome: Ok(FlowOutcome::Skipped("no data".into())),
                elapsed: Duration::ZERO,
            },
            FlowReport {
                name: "c".into(),
                outcome: Err(FlowError::Assertion("boom".into())),
                elapsed: Duration::ZERO,
            },
        ];
        assert_eq!(
            summarize(&reports),
            Summary {
                passed: 1,
                skipped: 1,
                failed: 1
            }
        );
    }

    #[test]
    fn test_report_predicates() {
        let report = FlowReport {
            name: "n".into(),
            outcome: Ok(FlowOutcome::Skipped("empty".into())),
            elapsed: Duration::ZERO,
        };
        assert!(report.skipped());
        assert!(!report.passed());
        assert!(!report.failed());
    }
}
