//! Configuration loading and resolution.

use std::time::Duration;

use fpds_feed::config::DEFAULT_FEED_URL;
use fpds_feed::FeedConfig;

pub const FEED_URL_ENV: &str = "FPDS_FEED_URL";
pub const INSECURE_TLS_ENV: &str = "FPDS_INSECURE_TLS";

/// Resolve the feed endpoint: explicit flag, then `FPDS_FEED_URL`, then the public feed.
pub fn resolve_feed_url(explicit: Option<&str>) -> String {
    if let Some(url) = explicit {
        return url.to_string();
    }

    if let Ok(env_url) = std::env::var(FEED_URL_ENV) {
        if !env_url.trim().is_empty() {
            return env_url;
        }
    }

    DEFAULT_FEED_URL.to_string()
}

fn insecure_from_env() -> bool {
    std::env::var(INSECURE_TLS_ENV)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Build the client configuration from command-line flags and environment.
pub fn resolve_feed_config(
    feed_url: Option<&str>,
    timeout_secs: Option<u64>,
    insecure: bool,
) -> FeedConfig {
    let mut config = FeedConfig::default().with_base_url(resolve_feed_url(feed_url));

    if let Some(secs) = timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    config.danger_accept_invalid_certs(insecure || insecure_from_env())
}
