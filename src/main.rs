//! GitHub UI flows - runner
//!
//! Executes every known flow (or the subset named on the command line)
//! sequentially, one fresh browser session per flow, and reports
//! pass/fail/skip per flow plus a summary. Exits non-zero if any flow failed.
//!
//! Environment variables:
//! - `GITHUB_FLOWS_USERNAME` / `GITHUB_FLOWS_PASSWORD` - account under test
//! - `GITHUB_FLOWS_HEADLESS` - "true"/"false"
//! - `GITHUB_FLOWS_CHROME_PATH` - explicit browser executable

use anyhow::bail;
use tracing::{error, info, warn};

use github_ui_flows::flows::{self, FlowOutcome, FLOW_NAMES};
use github_ui_flows::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _guard = github_ui_flows::init_logging();

    info!("Starting GitHub UI flows");
    if let Some(dir) = github_ui_flows::log_dir() {
        info!("Log files saved to: {}", dir.display());
    }

    let mut config = Config::load();
    if let Err(msg) = config.validate() {
        bail!(msg);
    }

    // A windowed browser needs a display; on a bare server fall back to
    // headless instead of failing at launch.
    if cfg!(target_os = "linux") && !config.headless {
        let has_display = std::env::var("DISPLAY")
            .map(|d| !d.is_empty())
            .unwrap_or(false);
        if !has_display {
            info!("No DISPLAY - forcing headless mode");
            config.headless = true;
        }
    }

    let requested: Vec<String> = std::env::args().skip(1).collect();
    let selected: Vec<&str> = if requested.is_empty() {
        FLOW_NAMES.to_vec()
    } else {
        for name in &requested {
            if !FLOW_NAMES.contains(&name.as_str()) {
                bail!(
                    "unknown flow `{}`; known flows: {}",
                    name,
                    FLOW_NAMES.join(", ")
                );
            }
        }
        requested.iter().map(String::as_str).collect()
    };

    let mut reports = Vec::with_capacity(selected.len());
    for name in selected {
        info!("=== Flow `{}` ===", name);
        let report = flows::run(name, &config).await;
        match &report.outcome {
            Ok(FlowOutcome::Passed) => {
                info!("PASS {} ({} ms)", report.name, report.elapsed.as_millis());
            }
            Ok(FlowOutcome::Skipped(reason)) => {
                warn!(
                    "SKIP {} ({} ms): {}",
                    report.name,
                    report.elapsed.as_millis(),
                    reason
                );
            }
            Err(e) => {
                error!("FAIL {} ({} ms): {}", report.name, report.elapsed.as_millis(), e);
            }
        }
        reports.push(report);
    }

    let summary = flows::summarize(&reports);
    info!(
        "Done: {} passed, {} skipped, {} failed",
        summary.passed, summary.skipped, summary.failed
    );

    if summary.failed > 0 {
        // Return through main so the logging guard drops and flushes the
        // buffered file logs of the failing run.
        bail!("{} flow(s) failed", summary.failed);
    }
    Ok(())
}
