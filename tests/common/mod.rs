// tests/common/mod.rs
// Shared test doubles: canned HTTP transport and scripted adapters.
#![allow(dead_code)]

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use headline_mood::ingest::http::HttpFetch;
use headline_mood::{FetchContext, HeadlineRecord, SourceAdapter, SourceError, SourceQueryResult};

pub const GOOGLE_RSS: &str = include_str!("../fixtures/google_news_rss.xml");
pub const REDDIT_ATOM: &str = include_str!("../fixtures/reddit_atom.xml");
pub const ARXIV_ATOM: &str = include_str!("../fixtures/arxiv_atom.xml");
pub const SCHOLAR_JSON: &str = include_str!("../fixtures/semantic_scholar.json");
pub const HN_JSON: &str = include_str!("../fixtures/hn_search.json");

/// Reference "now" used across fixtures.
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 15, 12, 0, 0).unwrap()
}

/// AllOrigins-style envelope around an upstream body.
pub fn relay_envelope(contents: &str) -> String {
    serde_json::json!({
        "contents": contents,
        "status": { "url": "https://upstream.test", "content_type": "application/rss+xml", "http_code": 200 }
    })
    .to_string()
}

/// Routes by URL substring; first match wins. Unrouted URLs are "unavailable".
#[derive(Default)]
pub struct CannedHttp {
    routes: Vec<(String, Result<String, SourceError>)>,
    calls: Mutex<Vec<String>>,
}

impl CannedHttp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, needle: &str, body: impl Into<String>) -> Self {
        self.routes.push((needle.to_string(), Ok(body.into())));
        self
    }

    pub fn fail(mut self, needle: &str, err: SourceError) -> Self {
        self.routes.push((needle.to_string(), Err(err)));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpFetch for CannedHttp {
    async fn get_text(&self, url: &str) -> Result<String, SourceError> {
        self.calls.lock().unwrap().push(url.to_string());
        self.routes
            .iter()
            .find(|(needle, _)| url.contains(needle.as_str()))
            .map(|(_, res)| res.clone())
            .unwrap_or_else(|| Err(SourceError::Unavailable(format!("no route for {url}"))))
    }
}

pub enum Script {
    Records(Vec<HeadlineRecord>),
    Fail(SourceError),
    Hang,
}

/// Adapter with scripted behaviour and optional latency.
pub struct ScriptedAdapter {
    pub name: String,
    pub script: Script,
    pub delay: Duration,
}

impl ScriptedAdapter {
    pub fn ok(name: &str, records: Vec<HeadlineRecord>) -> Box<dyn SourceAdapter> {
        Box::new(Self {
            name: name.into(),
            script: Script::Records(records),
            delay: Duration::ZERO,
        })
    }

    pub fn ok_after(name: &str, records: Vec<HeadlineRecord>, delay: Duration) -> Box<dyn SourceAdapter> {
        Box::new(Self {
            name: name.into(),
            script: Script::Records(records),
            delay,
        })
    }

    pub fn failing(name: &str) -> Box<dyn SourceAdapter> {
        Box::new(Self {
            name: name.into(),
            script: Script::Fail(SourceError::Unavailable("connection refused".into())),
            delay: Duration::ZERO,
        })
    }

    pub fn hanging(name: &str) -> Box<dyn SourceAdapter> {
        Box::new(Self {
            name: name.into(),
            script: Script::Hang,
            delay: Duration::ZERO,
        })
    }
}

#[async_trait]
impl SourceAdapter for ScriptedAdapter {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, _query: &str, _ctx: &FetchContext) -> SourceQueryResult {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match &self.script {
            Script::Records(r) => SourceQueryResult::Success {
                source: self.name.clone(),
                records: r.clone(),
            },
            Script::Fail(e) => SourceQueryResult::Failure {
                source: self.name.clone(),
                error: e.clone(),
            },
            Script::Hang => {
                std::future::pending::<()>().await;
                unreachable!()
            }
        }
    }
}

pub fn rec(title: &str, published_at: DateTime<Utc>) -> HeadlineRecord {
    HeadlineRecord {
        title: title.into(),
        link: format!("https://example.test/{}", title.replace(' ', "-")),
        published_at,
    }
}
