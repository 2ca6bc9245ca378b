//! Remote page fetcher used by the web summary path.
//!
//! Only a bounded prefix of the body is read; the rest of the response is
//! dropped unread.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tokio::time::timeout;
use tracing::debug;

use crate::error::AppError;

/// Bytes kept from a page body. Covers a 1000-character preview in any UTF-8.
pub const FETCH_BODY_LIMIT: usize = 4 * 1000;

#[async_trait]
pub trait PageFetcher: Send + Sync + 'static {
    /// Body text of the page at `url`, whatever its status code, cut to a
    /// bounded prefix.
    async fn fetch(&self, url: &str) -> Result<String, AppError>;
}

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
    body_limit: usize,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            timeout,
            body_limit: FETCH_BODY_LIMIT,
        }
    }

    pub fn with_body_limit(mut self, body_limit: usize) -> Self {
        self.body_limit = body_limit;
        self
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, AppError> {
        let url = url::Url::parse(url)?;
        debug!("Fetching {}", url);

        let bytes = timeout(self.timeout, async {
            let mut response = self.client.get(url).send().await?;
            let mut bytes = Vec::new();
            while let Some(chunk) = response.chunk().await? {
                bytes.extend_from_slice(&chunk);
                if bytes.len() >= self.body_limit {
                    bytes.truncate(self.body_limit);
                    break;
                }
            }
            Ok::<_, reqwest::Error>(bytes)
        })
        .await??;

        // A multi-byte character cut at the limit decodes to U+FFFD
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
