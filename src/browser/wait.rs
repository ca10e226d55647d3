//! Bounded-retry wait policy
//!
//! GitHub renders most page content asynchronously, so a lookup that fails
//! right after navigation usually succeeds a few hundred milliseconds later.
//! The wait policy re-evaluates a condition against the live page until it
//! yields a value or the deadline passes. Transient lookup failures (element
//! not yet attached, node detached mid-poll) are treated as not-yet-found and
//! retried; only persistent failure past the deadline surfaces as an error.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tracing::trace;

use super::FlowError;

/// Default per-condition timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default polling interval between condition evaluations.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Bounded-retry poller, fixed per session.
#[derive(Debug, Clone, Copy)]
pub struct WaitPolicy {
    timeout: Duration,
    interval: Duration,
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl WaitPolicy {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Re-evaluate `condition` until it returns `Ok` or the deadline passes.
    ///
    /// Every poll re-queries the live page; failed evaluations are never
    /// cached. The condition is always evaluated at least once, and the last
    /// failure reason is carried in the timeout error.
    pub async fn until<T, E, F, Fut>(&self, mut condition: F) -> Result<T, FlowError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Display,
    {
        let deadline = Instant::now() + self.timeout;
        let mut polls: u32 = 0;
        let mut last_failure;

        loop {
            polls += 1;
            match condition().await {
                Ok(value) => {
                    trace!("Condition satisfied after {} poll(s)", polls);
                    return Ok(value);
                }
                Err(e) => last_failure = e.to_string(),
            }

            if Instant::now() >= deadline {
                return Err(FlowError::WaitTimeout {
                    waited: self.timeout,
                    last_failure,
                });
            }
            tokio::time::sleep(self.interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn quick_policy() -> WaitPolicy {
        WaitPolicy::new(Duration::from_millis(100)).with_interval(Duration::from_millis(5))
    }

    #[tokio::test]
    async fn test_immediate_success_returns_value() {
        let result: Result<u32, FlowError> =
            quick_policy().until(|| async { Ok::<_, String>(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_condition_true_before_deadline_is_found() {
        let calls = AtomicU32::new(0);
        let result = quick_policy()
            .until(|| async {
                if calls.fetch_add(1, Ordering::Relaxed) < 3 {
                    Err("not yet rendered".to_string())
                } else {
                    Ok("found")
                }
            })
            .await;
        assert_eq!(result.unwrap(), "found");
        assert_eq!(calls.load(Ordering::Relaxed), 4);
    }

    #[tokio::test]
    async fn test_persistent_failure_times_out_with_last_reason() {
        let result: Result<(), FlowError> = quick_policy()
            .until(|| async { Err::<(), _>("element #missing not attached".to_string()) })
            .await;
        match result {
            Err(FlowError::WaitTimeout { last_failure, .. }) => {
                assert!(last_failure.contains("#missing"));
            }
            other => panic!("expected timeout, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_transient_errors_do_not_abort_early() {
        // Different failure reasons on every poll must keep the poll alive
        // until the condition finally holds.
        let calls = AtomicU32::new(0);
        let result = quick_policy()
            .until(|| async {
                let n = calls.fetch_add(1, Ordering::Relaxed);
                match n {
                    0 => Err("not attached".to_string()),
                    1 => Err("stale reference".to_string()),
                    2 => Err("detached mid-poll".to_string()),
                    _ => Ok(n),
                }
            })
            .await;
        assert_eq!(result.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_found_on_tenth_poll_within_budget() {
        // Scaled version of the reference scenario: success on poll 10 with
        // an interval well inside the timeout must resolve as found.
        let policy =
            WaitPolicy::new(Duration::from_millis(200)).with_interval(Duration::from_millis(10));
        let calls = AtomicU32::new(0);
        let result = policy
            .until(|| async {
                if calls.fetch_add(1, Ordering::Relaxed) < 9 {
                    Err("not found".to_string())
                } else {
                    Ok(())
                }
            })
            .await;
        assert!(result.is_ok());
        assert_eq!(calls.load(Ordering::Relaxed), 10);
    }

    #[tokio::test]
    async fn test_condition_always_evaluated_at_least_once() {
        let policy = WaitPolicy::new(Duration::ZERO).with_interval(Duration::from_millis(1));
        let calls = AtomicU32::new(0);
        let result = policy
            .until(|| async {
                calls.fetch_add(1, Ordering::Relaxed);
                Ok::<_, String>(())
            })
            .await;
        assert!(result.is_ok());
        assert_eq!(calls.load(Ordering::Relaxed), 1);
    }
}
