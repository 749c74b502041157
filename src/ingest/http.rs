// src/ingest/http.rs
//! Transport seam. Adapters only need "GET this URL, give me the body",
//! so the HTTP client stays swappable (tests feed canned bodies).

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;

use crate::ingest::types::SourceError;

#[async_trait]
pub trait HttpFetch: Send + Sync {
    async fn get_text(&self, url: &str) -> Result<String, SourceError>;
}

/// `reqwest`-backed transport with a shared connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestFetch {
    client: reqwest::Client,
}

impl ReqwestFetch {
    pub fn new(user_agent: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .context("building reqwest client")?;
        Ok(Self { client })
    }

    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpFetch for ReqwestFetch {
    async fn get_text(&self, url: &str) -> Result<String, SourceError> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SourceError::Unavailable(format!("GET {url}: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SourceError::Unavailable(format!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        resp.text()
            .await
            .map_err(|e| SourceError::Unavailable(format!("reading body of {url}: {e}")))
    }
}
