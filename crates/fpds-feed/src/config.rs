//! Feed endpoint and HTTP client settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_FEED_URL: &str = "https://www.fpds.gov/ezsearch/FEEDS/ATOM";
pub const DEFAULT_FEED_NAME: &str = "PUBLIC";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
/// Entries per page the feed normally returns; a shorter page ends the query.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Settings for one feed client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedConfig {
    pub base_url: String,
    pub feed_name: String,
    pub timeout: Duration,
    pub page_size: usize,
    /// Skip TLS certificate verification. Off unless explicitly enabled.
    pub accept_invalid_certs: bool,
    pub user_agent: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_FEED_URL.to_string(),
            feed_name: DEFAULT_FEED_NAME.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            page_size: DEFAULT_PAGE_SIZE,
            accept_invalid_certs: false,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl FeedConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_feed_name(mut self, feed_name: impl Into<String>) -> Self {
        self.feed_name = feed_name.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Disable certificate verification for this client.
    pub fn danger_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }
}
