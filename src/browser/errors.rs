//! Flow error types

use std::time::Duration;

use thiserror::Error;

/// Errors raised while driving the browser through a flow.
///
/// `Lookup` is the transient class: the wait policy absorbs it and retries
/// until its deadline. Everything else aborts the enclosing flow immediately.
#[derive(Error, Debug)]
pub enum FlowError {
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("Connection lost: {0}")]
    ConnectionLost(String),

    #[error("Element lookup failed: {0}")]
    Lookup(String),

    #[error("Condition not met within {waited:?}: {last_failure}")]
    WaitTimeout {
        waited: Duration,
        last_failure: String,
    },

    #[error("Assertion failed: {0}")]
    Assertion(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<FlowError> for String {
    fn from(err: FlowError) -> String {
        err.to_string()
    }
}
