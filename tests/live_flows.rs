//! Live flow tests against github.com
//!
//! These drive a real browser against a real GitHub account, so they are
//! ignored by default. Provide `GITHUB_FLOWS_USERNAME` and
//! `GITHUB_FLOWS_PASSWORD`, make sure Chrome/Chromium is installed, and run
//! with `cargo test -- --ignored`.

use github_ui_flows::browser::{BrowserSession, BrowserSessionConfig};
use github_ui_flows::flows;
use github_ui_flows::Config;

fn live_config() -> Config {
    let config = Config::load();
    config
        .validate()
        .expect("set GITHUB_FLOWS_USERNAME and GITHUB_FLOWS_PASSWORD");
    config
}

#[tokio::test]
#[ignore = "requires a live browser and GitHub credentials"]
async fn login_flow_passes() {
    let config = live_config();
    let report = flows::run("login", &config).await;
    assert!(report.passed(), "login flow failed: {:?}", report.outcome);
}

#[tokio::test]
#[ignore = "requires a live browser and GitHub credentials"]
async fn notifications_flow_never_fails_on_empty_inbox() {
    let config = live_config();
    let report = flows::run("notifications", &config).await;
    // Zero notifications must surface as an explicit skip, not a failure.
    assert!(
        !report.failed(),
        "notifications flow failed: {:?}",
        report.outcome
    );
}

#[tokio::test]
#[ignore = "requires a live browser and GitHub credentials"]
async fn sequential_flows_reauthenticate_independently() {
    // Two runs of the same flow produce two sessions and two independent
    // login attempts; nothing is memoized across them.
    let config = live_config();
    let first = flows::run("login", &config).await;
    let second = flows::run("login", &config).await;
    assert!(first.passed(), "first run failed: {:?}", first.outcome);
    assert!(second.passed(), "second run failed: {:?}", second.outcome);
}

#[tokio::test]
#[ignore = "requires a live browser"]
async fn session_teardown_runs_exactly_once() {
    let session_config = BrowserSessionConfig::for_session("teardown-check");
    let mut session = BrowserSession::new(session_config).await.expect("launch");
    assert!(session.is_alive());
    assert!(!session.is_closed());

    session.close().await.expect("first close");
    assert!(session.is_closed());
    assert!(!session.is_alive());

    // The second close must be a no-op, not a second teardown attempt
    // against an already-dead process.
    session.close().await.expect("second close");
    assert!(session.is_closed());
}

#[tokio::test]
#[ignore = "requires a live browser"]
async fn failed_flow_still_tears_down_and_reports() {
    // Bad credentials make the sign-in setup step fail; the run must still
    // come back as a report (teardown included) rather than a panic or hang.
    let config = Config {
        username: "nobody-in-particular".to_string(),
        password: "not-the-password".to_string(),
        wait_timeout_secs: 3,
        ..Default::default()
    };
    let report = flows::run("profile", &config).await;
    assert!(report.failed(), "expected failure, got {:?}", report.outcome);
}

#[tokio::test]
#[ignore = "requires a live browser and GitHub credentials"]
async fn profile_flow_passes() {
    let config = live_config();
    let report = flows::run("profile", &config).await;
    assert!(report.passed(), "profile flow failed: {:?}", report.outcome);
}
