//! # Store Configuration
//!
//! Where the REST repository points and how long it waits.

use std::time::Duration;

/// Base URL used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";

/// REST store configuration.
///
/// ## Example
/// ```rust
/// use std::time::Duration;
/// use tally_store::StoreConfig;
///
/// let config = StoreConfig::new("https://backoffice.example.com/api/")
///     .timeout(Duration::from_secs(10));
///
/// assert_eq!(config.base_url, "https://backoffice.example.com/api");
/// assert_eq!(config.row_url("USR-010"), "https://backoffice.example.com/api/USR-010");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Collection URL, without trailing slash.
    pub base_url: String,

    /// Per-request timeout.
    /// Default: 30 seconds
    pub timeout: Duration,

    /// Sent as `User-Agent`.
    pub user_agent: String,

    /// Honor `HTTP_PROXY`/`HTTPS_PROXY`/`NO_PROXY`.
    /// Default: true
    pub use_system_proxy: bool,
}

impl StoreConfig {
    /// Creates a configuration for the given collection URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        StoreConfig {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(30),
            user_agent: concat!("tally/", env!("CARGO_PKG_VERSION")).to_string(),
            use_system_proxy: true,
        }
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Connects directly, ignoring proxy environment variables.
    pub fn without_proxy(mut self) -> Self {
        self.use_system_proxy = false;
        self
    }

    /// `{base}/{id}`.
    pub fn row_url(&self, id: &str) -> String {
        format!("{}/{}", self.base_url, id)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::new(DEFAULT_API_URL)
    }
}
