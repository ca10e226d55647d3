//! Browser session management
//!
//! Handles launching and controlling one Chromium instance per flow. A
//! session is owned exclusively by the flow that created it and is torn down
//! unconditionally when the flow ends, pass or fail, so no browser process
//! outlives its flow.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::{Element, Page};
use futures::StreamExt;
use rand::Rng;
use tracing::{debug, info, warn};

use super::locator::{Locator, Query};
use super::FlowError;

/// Global counter for sequential session naming (Session-1, Session-2, ...)
static SESSION_COUNTER: AtomicU32 = AtomicU32::new(1);

/// Find a Chrome/Chromium executable on the system.
fn find_chrome() -> Option<std::path::PathBuf> {
    let candidates: Vec<std::path::PathBuf> = if cfg!(target_os = "windows") {
        let mut paths = vec![
            std::path::PathBuf::from(r"C:\Program Files\Google\Chrome\Application\chrome.exe"),
            std::path::PathBuf::from(
                r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
            ),
        ];
        if let Ok(local) = std::env::var("LOCALAPPDATA") {
            paths.push(std::path::PathBuf::from(format!(
                r"{}\Google\Chrome\Application\chrome.exe",
                local
            )));
        }
        paths
    } else if cfg!(target_os = "macos") {
        vec![std::path::PathBuf::from(
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
        )]
    } else {
        vec![
            std::path::PathBuf::from("/usr/bin/chromium"),
            std::path::PathBuf::from("/usr/bin/chromium-browser"),
            std::path::PathBuf::from("/usr/bin/google-chrome"),
            std::path::PathBuf::from("/usr/bin/google-chrome-stable"),
        ]
    };

    candidates.into_iter().find(|p| p.exists())
}

/// Configuration for a browser session
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserSessionConfig {
    /// Path to Chrome/Chromium executable
    pub chrome_path: Option<String>,
    /// Run in headless mode
    pub headless: bool,
    /// User data directory
    pub user_data_dir: Option<String>,
    /// Navigation timeout in seconds
    pub timeout_secs: u64,
    /// Window width
    pub window_width: u32,
    /// Window height
    pub window_height: u32,
}

impl Default for BrowserSessionConfig {
    fn default() -> Self {
        Self {
            chrome_path: None,
            headless: true,
            user_data_dir: None,
            timeout_secs: 30,
            window_width: 1920,
            window_height: 1080,
        }
    }
}

impl BrowserSessionConfig {
    /// Create config for a specific session with its own data directory
    pub fn for_session(session_id: &str) -> Self {
        let base = std::env::temp_dir()
            .join("github-ui-flows")
            .join("browser_data");

        let user_data_dir = base.join(session_id).to_string_lossy().to_string();

        Self {
            user_data_dir: Some(user_data_dir),
            ..Default::default()
        }
    }

    /// Set headless mode
    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set Chrome path
    pub fn chrome_path(mut self, path: Option<String>) -> Self {
        self.chrome_path = path;
        self
    }
}

/// One browser process, exclusively owned by one running flow.
pub struct BrowserSession {
    /// Display name, e.g. "Session-1"
    pub id: String,
    browser: Option<Browser>,
    page: Option<Page>,
    /// Whether the browser process is still connected
    alive: Arc<AtomicBool>,
    /// Set once teardown has run; teardown is idempotent
    closed: bool,
    config: BrowserSessionConfig,
}

impl BrowserSession {
    /// Launch a new browser session with the given config.
    pub async fn new(config: BrowserSessionConfig) -> Result<Self, FlowError> {
        let session_id = format!("Session-{}", SESSION_COUNTER.fetch_add(1, Ordering::Relaxed));

        info!(
            "Launching browser session {} (headless: {})",
            session_id, config.headless
        );

        if config.chrome_path.is_none() && find_chrome().is_none() {
            return Err(FlowError::LaunchFailed(
                "No Chrome/Chromium executable found. Install Chrome or set chromePath."
                    .to_string(),
            ));
        }

        let mut builder = BrowserConfig::builder();

        if !config.headless {
            builder = builder.with_head();
        }

        if let Some(ref path) = config.chrome_path {
            builder = builder.chrome_executable(path);
        } else if let Some(chrome_path) = find_chrome() {
            debug!("Auto-detected Chrome at: {}", chrome_path.display());
            builder = builder.chrome_executable(chrome_path);
        }

        if let Some(ref dir) = config.user_data_dir {
            let _ = std::fs::create_dir_all(dir);
            builder = builder.user_data_dir(dir);
        }

        builder = builder
            .window_size(config.window_width, config.window_height)
            .arg("--no-default-browser-check")
            .arg("--disable-infobars")
            .arg("--disable-notifications")
            // Required when running as root (e.g., in Docker or on a VPS)
            .arg("--no-sandbox");

        let browser_config = builder
            .build()
            .map_err(FlowError::LaunchFailed)?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| FlowError::LaunchFailed(e.to_string()))?;

        // Drain CDP events in the background; when the handler ends, the
        // browser has disconnected or crashed.
        let session_id_clone = session_id.clone();
        let alive_flag = Arc::new(AtomicBool::new(true));
        let alive_for_handler = alive_flag.clone();
        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("Session {} browser event error: {:?}", session_id_clone, e);
                }
            }
            warn!(
                "Session {} browser disconnected (event handler ended)",
                session_id_clone
            );
            alive_for_handler.store(false, Ordering::Relaxed);
        });

        // Take the tab Chrome opened with; close any extras.
        let page = {
            let mut pages = browser
                .pages()
                .await
                .map_err(|e| FlowError::LaunchFailed(e.to_string()))?;

            let main_page = if !pages.is_empty() {
                pages.remove(0)
            } else {
                browser
                    .new_page("about:blank")
                    .await
                    .map_err(|e| FlowError::LaunchFailed(e.to_string()))?
            };

            for extra_page in pages {
                debug!("Closing extra blank tab");
                let _ = extra_page.close().await;
            }

            main_page
        };

        info!("Browser session {} created", session_id);

        Ok(Self {
            id: session_id,
            browser: Some(browser),
            page: Some(page),
            alive: alive_flag,
            closed: false,
            config,
        })
    }

    /// Check if the browser process is still connected.
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Relaxed)
    }

    /// Whether teardown has already run for this session.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn page(&self) -> Result<&Page, FlowError> {
        // Fail fast once the browser has disconnected instead of letting
        // every poll time out against a dead process.
        if !self.is_alive() {
            return Err(FlowError::ConnectionLost(
                "Browser process disconnected".into(),
            ));
        }
        self.page
            .as_ref()
            .ok_or_else(|| FlowError::ConnectionLost("No active page".into()))
    }

    /// Navigate to a URL and wait for the navigation to settle.
    pub async fn navigate(&self, url: &str) -> Result<(), FlowError> {
        let page = self.page()?;

        let address = url::Url::parse(url)
            .map_err(|e| FlowError::NavigationFailed(format!("{}: {}", url, e)))?;

        debug!("Session {} navigating to: {}", self.id, address);
        page.goto(address.as_str())
            .await
            .map_err(|e| FlowError::NavigationFailed(format!("{}: {}", url, e)))?;

        tokio::time::timeout(
            Duration::from_secs(self.config.timeout_secs),
            page.wait_for_navigation(),
        )
        .await
        .map_err(|_| FlowError::NavigationFailed(format!("{}: navigation timeout", url)))?
        .map_err(|e| FlowError::NavigationFailed(format!("{}: {}", url, e)))?;

        Ok(())
    }

    /// Reload the current page and wait for it to settle.
    pub async fn reload(&self) -> Result<(), FlowError> {
        let page = self.page()?;
        page.reload()
            .await
            .map_err(|e| FlowError::NavigationFailed(format!("reload: {}", e)))?;
        tokio::time::timeout(
            Duration::from_secs(self.config.timeout_secs),
            page.wait_for_navigation(),
        )
        .await
        .map_err(|_| FlowError::NavigationFailed("reload: navigation timeout".into()))?
        .map_err(|e| FlowError::NavigationFailed(format!("reload: {}", e)))?;
        Ok(())
    }

    /// Get the current page address.
    pub async fn current_url(&self) -> Result<String, FlowError> {
        let page = self.page()?;
        page.url()
            .await
            .map_err(|e| FlowError::ConnectionLost(e.to_string()))?
            .ok_or_else(|| FlowError::ConnectionLost("No URL".into()))
    }

    /// Look up a single element. A miss is reported as a transient
    /// [`FlowError::Lookup`]; callers wanting retry go through the wait
    /// policy.
    pub async fn find(&self, locator: &Locator) -> Result<Element, FlowError> {
        let page = self.page()?;
        match locator.query() {
            Query::Css(css) => page
                .find_element(css)
                .await
                .map_err(|e| FlowError::Lookup(format!("{}: {}", locator, e))),
            Query::XPath(xpath) => page
                .find_xpath(xpath)
                .await
                .map_err(|e| FlowError::Lookup(format!("{}: {}", locator, e))),
        }
    }

    /// Look up all elements matching a locator. Zero matches is a valid
    /// result, not an error.
    pub async fn find_all(&self, locator: &Locator) -> Result<Vec<Element>, FlowError> {
        let page = self.page()?;
        match locator.query() {
            Query::Css(css) => page
                .find_elements(css)
                .await
                .map_err(|e| FlowError::Lookup(format!("{}: {}", locator, e))),
            Query::XPath(xpath) => page
                .find_xpaths(xpath)
                .await
                .map_err(|e| FlowError::Lookup(format!("{}: {}", locator, e))),
        }
    }

    /// Type text into an element, character by character with human-like
    /// jitter so GitHub's client-side validation keeps up.
    pub async fn type_into(&self, element: &Element, text: &str) -> Result<(), FlowError> {
        element
            .click()
            .await
            .map_err(|e| FlowError::Lookup(format!("click before typing: {}", e)))?;

        for c in text.chars() {
            element
                .type_str(c.to_string())
                .await
                .map_err(|e| FlowError::Lookup(format!("typing: {}", e)))?;
            let delay = rand::thread_rng().gen_range(20..=80);
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }

        Ok(())
    }

    /// Clear a form field's current value.
    pub async fn clear(&self, element: &Element) -> Result<(), FlowError> {
        element
            .call_js_fn(
                "function() { this.value = ''; this.dispatchEvent(new Event('input', { bubbles: true })); }",
                false,
            )
            .await
            .map_err(|e| FlowError::Lookup(format!("clearing field: {}", e)))?;
        Ok(())
    }

    /// Read a form control's current value (the live DOM property, not the
    /// markup attribute).
    pub async fn field_value(&self, element: &Element) -> Result<String, FlowError> {
        let ret = element
            .call_js_fn("function() { return this.value; }", false)
            .await
            .map_err(|e| FlowError::Lookup(format!("reading field value: {}", e)))?;
        Ok(ret
            .result
            .value
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default())
    }

    /// Whether an element takes up layout space on the page.
    pub async fn is_displayed(&self, element: &Element) -> Result<bool, FlowError> {
        let ret = element
            .call_js_fn(
                "function() { return this.offsetParent !== null || this.getClientRects().length > 0; }",
                false,
            )
            .await
            .map_err(|e| FlowError::Lookup(format!("visibility check: {}", e)))?;
        Ok(ret
            .result
            .value
            .and_then(|v| v.as_bool())
            .unwrap_or(false))
    }

    /// Close the browser session. Idempotent: the first call tears the
    /// process down, later calls are no-ops.
    pub async fn close(&mut self) -> Result<(), FlowError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.alive.store(false, Ordering::Relaxed);

        if let Some(page) = self.page.take() {
            let _ = page.close().await;
        }

        if let Some(mut browser) = self.browser.take() {
            // Graceful close first, then force kill so no Chromium child
            // processes leak when the flow failed mid-navigation.
            let _ = browser.close().await;
            tokio::time::sleep(Duration::from_millis(500)).await;
            let _ = browser.kill().await;
        }

        info!("Browser session {} closed", self.id);
        Ok(())
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        if !self.closed {
            warn!(
                "Session {} dropped without close(); browser process may linger",
                self.id
            );
        }
    }
}
