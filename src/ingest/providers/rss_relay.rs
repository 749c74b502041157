// src/ingest/providers/rss_relay.rs
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::ingest::feed;
use crate::ingest::http::HttpFetch;
use crate::ingest::types::{
    FetchContext, HeadlineRecord, SourceAdapter, SourceError, SourceQueryResult,
};
use crate::ingest::{expand_template, settle, timed_parse};

/// Cross-origin relay in front of a feed URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Relay {
    /// Fetch the feed URL as is.
    #[default]
    Direct,
    /// AllOrigins-style `get?url=` endpoint answering `{"contents": "...", "status": {..}}`.
    Json { base: String },
    /// Pass-through endpoint (`raw?url=`) answering with the upstream body.
    Raw { base: String },
}

#[derive(Debug, Deserialize)]
struct Envelope {
    contents: Option<String>,
    status: Option<EnvelopeStatus>,
}

#[derive(Debug, Deserialize)]
struct EnvelopeStatus {
    http_code: Option<u16>,
}

impl Relay {
    pub fn wrap(&self, url: &str) -> String {
        match self {
            Relay::Direct => url.to_string(),
            Relay::Json { base } | Relay::Raw { base } => {
                format!("{base}{}", urlencoding::encode(url))
            }
        }
    }

    /// Extract the upstream body. An upstream non-2xx reported inside the
    /// envelope counts as the source being unavailable.
    pub fn unwrap_body(&self, body: String) -> Result<String, SourceError> {
        let Relay::Json { .. } = self else {
            return Ok(body);
        };
        let env: Envelope = serde_json::from_str(&body)
            .context("parsing relay envelope")
            .map_err(|e| SourceError::MalformedResponse(format!("{e:#}")))?;

        if let Some(code) = env.status.and_then(|s| s.http_code) {
            if !(200..300).contains(&code) {
                return Err(SourceError::Unavailable(format!(
                    "upstream HTTP {code} via relay"
                )));
            }
        }
        env.contents
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| SourceError::MalformedResponse("relay returned no contents".into()))
    }
}

/// RSS (or Atom, sniffed from the root element) behind an optional relay.
pub struct RssRelayAdapter {
    name: String,
    url_template: String,
    relay: Relay,
    http: Arc<dyn HttpFetch>,
}

impl RssRelayAdapter {
    pub fn new(
        name: impl Into<String>,
        url_template: impl Into<String>,
        relay: Relay,
        http: Arc<dyn HttpFetch>,
    ) -> Self {
        Self {
            name: name.into(),
            url_template: url_template.into(),
            relay,
            http,
        }
    }

    /// Final URL requested for `query`, relay included.
    pub fn request_url(&self, query: &str) -> String {
        self.relay.wrap(&expand_template(&self.url_template, query))
    }

    async fn try_fetch(
        &self,
        query: &str,
        ctx: &FetchContext,
    ) -> Result<Vec<HeadlineRecord>, SourceError> {
        let body = self.http.get_text(&self.request_url(query)).await?;
        let xml = self.relay.unwrap_body(body)?;
        let entries = timed_parse(&self.name, || feed::parse_any(&xml))?;
        Ok(feed::into_records(entries, ctx))
    }
}

#[async_trait]
impl SourceAdapter for RssRelayAdapter {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, query: &str, ctx: &FetchContext) -> SourceQueryResult {
        settle(&self.name, self.try_fetch(query, ctx).await)
    }
}
