//! Browser automation module
//!
//! Owns the thin layer between the flows and the CDP client: one browser
//! process per session, locator lowering, and the bounded-retry wait policy.

mod errors;
mod locator;
mod session;
mod wait;

pub use errors::FlowError;
pub use locator::{Locator, Query, Strategy};
pub use session::{BrowserSession, BrowserSessionConfig};
pub use wait::{WaitPolicy, DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT};
