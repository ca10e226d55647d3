//! Harness configuration
//!
//! Loaded from a JSON file under the platform config dir, then overridden by
//! environment variables. Credentials should come from the environment so
//! they never land in the saved file by accident:
//!
//! - `GITHUB_FLOWS_USERNAME` / `GITHUB_FLOWS_PASSWORD` - account under test
//! - `GITHUB_FLOWS_REPOSITORY` - base name for created repositories
//! - `GITHUB_FLOWS_HEADLESS` - "true"/"false"
//! - `GITHUB_FLOWS_CHROME_PATH` - explicit browser executable

use std::path::PathBuf;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::browser::WaitPolicy;

/// Harness configuration
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// GitHub account username
    pub username: String,
    /// GitHub account password
    pub password: String,

    /// Base name for repositories created by the create-repository flow.
    /// A unique suffix is appended per run so repeated runs never collide
    /// with a pre-existing repository.
    #[serde(default = "default_repository")]
    pub repository: String,

    /// owner/name of the third-party repository the fork flow forks
    #[serde(default = "default_fork_source")]
    pub fork_source: String,

    /// Query typed into the header search box by the search flow
    #[serde(default = "default_search_query")]
    pub search_query: String,

    /// Bio text written by the update-bio flow
    #[serde(default = "default_bio")]
    pub bio: String,

    /// Run the browser headless
    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Explicit Chrome/Chromium executable, auto-detected when unset
    #[serde(default)]
    pub chrome_path: Option<String>,

    /// Per-condition wait budget in seconds
    #[serde(default = "default_wait_timeout_secs")]
    pub wait_timeout_secs: u64,

    /// Polling interval inside the wait budget, in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_repository() -> String {
    "test-repository".to_string()
}

fn default_fork_source() -> String {
    "github/hub".to_string()
}

fn default_search_query() -> String {
    "browser automation harness".to_string()
}

fn default_bio() -> String {
    "This is a test bio.".to_string()
}

fn default_headless() -> bool {
    true
}

fn default_wait_timeout_secs() -> u64 {
    10
}

fn default_poll_interval_ms() -> u64 {
    500
}

impl Default for Config {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            repository: default_repository(),
            fork_source: default_fork_source(),
            search_query: default_search_query(),
            bio: default_bio(),
            headless: default_headless(),
            chrome_path: None,
            wait_timeout_secs: default_wait_timeout_secs(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl Config {
    /// Get config file path
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("github-ui-flows").join("config.json"))
    }

    /// Load config from file, then apply environment overrides.
    ///
    /// On first run the defaults are written back as an editable template.
    /// This happens before the environment is overlaid, so credentials
    /// never end up in the file.
    pub fn load() -> Self {
        let first_run = Self::config_path().map(|p| !p.exists()).unwrap_or(false);
        let mut config = Self::load_file();
        if first_run {
            config.save();
        }
        config.apply_env_overrides();
        config
    }

    fn load_file() -> Self {
        if let Some(path) = Self::config_path() {
            if path.exists() {
                match std::fs::read_to_string(&path) {
                    Ok(content) => match serde_json::from_str(&content) {
                        Ok(config) => {
                            info!("Loaded config from {:?}", path);
                            return config;
                        }
                        Err(e) => {
                            warn!("Failed to parse config file: {}", e);
                        }
                    },
                    Err(e) => {
                        warn!("Failed to read config file: {}", e);
                    }
                }
            }
        }
        Self::default()
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("GITHUB_FLOWS_USERNAME") {
            self.username = v;
        }
        if let Ok(v) = std::env::var("GITHUB_FLOWS_PASSWORD") {
            self.password = v;
        }
        if let Ok(v) = std::env::var("GITHUB_FLOWS_REPOSITORY") {
            self.repository = v;
        }
        if let Ok(v) = std::env::var("GITHUB_FLOWS_HEADLESS") {
            self.headless = v.eq_ignore_ascii_case("true") || v == "1";
        }
        if let Ok(v) = std::env::var("GITHUB_FLOWS_CHROME_PATH") {
            self.chrome_path = Some(v);
        }
    }

    /// Save config to file
    pub fn save(&self) {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    error!("Failed to create config directory: {}", e);
                    return;
                }
            }

            match serde_json::to_string_pretty(self) {
                Ok(content) => {
                    if let Err(e) = std::fs::write(&path, content) {
                        error!("Failed to save config: {}", e);
                    } else {
                        info!("Config saved to {:?}", path);
                    }
                }
                Err(e) => {
                    error!("Failed to serialize config: {}", e);
                }
            }
        }
    }

    /// Check that the config is complete enough to run flows.
    pub fn validate(&self) -> Result<(), String> {
        if self.username.is_empty() || self.password.is_empty() {
            return Err(
                "GitHub credentials missing; set GITHUB_FLOWS_USERNAME and GITHUB_FLOWS_PASSWORD"
                    .to_string(),
            );
        }
        Ok(())
    }

    /// Wait policy shared by every step of a flow.
    pub fn wait_policy(&self) -> WaitPolicy {
        WaitPolicy::new(Duration::from_secs(self.wait_timeout_secs))
            .with_interval(Duration::from_millis(self.poll_interval_ms))
    }

    /// A repository name that will not collide with earlier runs.
    pub fn unique_repository_name(&self) -> String {
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        format!("{}-{}", self.repository, &suffix[..8])
    }

    pub fn profile_url(&self) -> String {
        format!("https://github.com/{}", self.username)
    }

    pub fn repositories_url(&self) -> String {
        format!("https://github.com/{}?tab=repositories", self.username)
    }

    pub fn repository_url(&self, name: &str) -> String {
        format!("https://github.com/{}/{}", self.username, name)
    }

    pub fn pulls_url(&self) -> String {
        format!(
            "https://github.com/{}/{}/pulls",
            self.username, self.repository
        )
    }

    pub fn fork_source_url(&self) -> String {
        format!("https://github.com/{}", self.fork_source)
    }

    /// The URL fragment a successful fork lands on: the forked repository
    /// under the test account's namespace.
    pub fn fork_result_fragment(&self) -> String {
        let repo_name = self
            .fork_source
            .rsplit('/')
            .next()
            .unwrap_or(self.fork_source.as_str());
        format!("{}/{}", self.username, repo_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_sane() {
        let config = Config::default();
        assert!(config.headless);
        assert_eq!(config.wait_timeout_secs, 10);
        assert_eq!(config.repository, "test-repository");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_wait_policy_reflects_config() {
        let config = Config {
            wait_timeout_secs: 3,
            poll_interval_ms: 50,
            ..Default::default()
        };
        assert_eq!(config.wait_policy().timeout(), Duration::from_secs(3));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_first_run_writes_template_without_credentials() {
        let dir = std::env::temp_dir().join(format!(
            "github-ui-flows-config-{}",
            uuid::Uuid::new_v4().simple()
        ));
        std::env::set_var("XDG_CONFIG_HOME", &dir);
        let _ = Config::load();
        std::env::remove_var("XDG_CONFIG_HOME");

        let path = dir.join("github-ui-flows").join("config.json");
        let content = std::fs::read_to_string(&path).expect("template written on first run");
        let saved: Config = serde_json::from_str(&content).expect("template parses");
        // The template is written before env overrides are applied, so
        // credentials stay out of the file.
        assert!(saved.username.is_empty());
        assert!(saved.password.is_empty());
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_unique_repository_names_do_not_collide() {
        let config = Config::default();
        let a = config.unique_repository_name();
        let b = config.unique_repository_name();
        assert_ne!(a, b);
        assert!(a.starts_with("test-repository-"));
    }

    #[test]
    fn test_fork_result_fragment_uses_account_namespace() {
        let config = Config {
            username: "octocat".to_string(),
            fork_source: "github/hub".to_string(),
            ..Default::default()
        };
        assert_eq!(config.fork_result_fragment(), "octocat/hub");
        assert_eq!(config.fork_source_url(), "https://github.com/github/hub");
    }

    #[test]
    fn test_urls_are_account_scoped() {
        let config = Config {
            username: "octocat".to_string(),
            ..Default::default()
        };
        assert_eq!(config.profile_url(), "https://github.com/octocat");
        assert_eq!(
            config.repositories_url(),
            "https://github.com/octocat?tab=repositories"
        );
        assert_eq!(
            config.pulls_url(),
            "https://github.com/octocat/test-repository/pulls"
        );
    }
}
