//! Page fetching.
//!
//! The driver only sees response bodies through [`FeedTransport`], so tests
//! can script pages without a network.

use std::sync::Arc;

use async_trait::async_trait;
use url::Url;

use crate::config::FeedConfig;
use crate::types::{FeedError, FeedResult};

/// Something that can GET one feed page and return its body.
#[async_trait]
pub trait FeedTransport: Send + Sync {
    async fn fetch(&self, url: &Url) -> FeedResult<String>;
}

#[async_trait]
impl<T: FeedTransport + ?Sized> FeedTransport for Arc<T> {
    async fn fetch(&self, url: &Url) -> FeedResult<String> {
        (**self).fetch(url).await
    }
}

/// reqwest-backed transport.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a client with the configured timeout and user agent.
    pub fn new(config: &FeedConfig) -> FeedResult<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str());

        if config.accept_invalid_certs {
            tracing::warn!("TLS certificate verification disabled for feed requests");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder
            .build()
            .map_err(|e| FeedError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl FeedTransport for HttpTransport {
    async fn fetch(&self, url: &Url) -> FeedResult<String> {
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }

        Ok(response.text().await?)
    }
}
