//! GitHub UI flows
//!
//! A browser-automation harness that drives a real Chromium instance against
//! github.com to exercise complete user journeys: login, profile editing,
//! repository creation, starring, forking, searching, notifications, and
//! pull-request access. Each flow owns one browser session, authenticates
//! independently, and tears its session down unconditionally when it ends.

pub mod browser;
pub mod config;
pub mod flows;

use std::path::PathBuf;

pub use config::Config;

/// Get log directory path (shared across modules)
pub fn log_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("github-ui-flows").join("logs"))
}

/// Initialize logging: console always, daily rolling file when a config dir
/// is available.
pub fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false);

    if let Some(log_dir) = log_dir() {
        let _ = std::fs::create_dir_all(&log_dir);
        let file_appender = tracing_appender::rolling::daily(&log_dir, "github-ui-flows.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(true)
            .with_writer(non_blocking);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .with(file_layer)
            .init();

        Some(guard)
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .init();

        None
    }
}
