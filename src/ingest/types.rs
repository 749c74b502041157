// src/ingest/types.rs
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Link used when a source item carries no URL.
pub const MISSING_LINK: &str = "#";

/// Common normalized unit produced by every source adapter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HeadlineRecord {
    pub title: String,
    pub link: String,
    pub published_at: DateTime<Utc>,
}

impl HeadlineRecord {
    /// Map raw source fields into a record, applying the defaults:
    /// - title is normalized and must be non-empty (otherwise `None`),
    /// - a missing/blank link becomes `"#"`,
    /// - a missing/unparsable date becomes `now`.
    pub fn from_raw(
        title: Option<&str>,
        link: Option<&str>,
        published_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Option<Self> {
        let title = crate::ingest::normalize_text(title.unwrap_or_default());
        if title.is_empty() {
            return None;
        }
        let link = link
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(MISSING_LINK)
            .to_string();
        Some(Self {
            title,
            link,
            published_at: published_at.unwrap_or(now),
        })
    }
}

/// Source-level failure taxonomy. Both variants are recovered by the aggregator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    /// Network error, non-2xx status or timeout.
    #[error("source unavailable: {0}")]
    Unavailable(String),
    /// Body arrived but could not be parsed into items.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Outcome of one adapter invocation. Always one of the two tagged states.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceQueryResult {
    Success {
        source: String,
        records: Vec<HeadlineRecord>,
    },
    Failure {
        source: String,
        error: SourceError,
    },
}

impl SourceQueryResult {
    pub fn source(&self) -> &str {
        match self {
            Self::Success { source, .. } | Self::Failure { source, .. } => source,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Per-run parameters shared by every adapter in a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchContext {
    pub now: DateTime<Utc>,
    pub window: Duration,
}

impl FetchContext {
    pub fn new(now: DateTime<Utc>, window: Duration) -> Self {
        Self { now, window }
    }

    /// Oldest timestamp still inside the window (inclusive). A window
    /// reaching past the representable range keeps everything.
    pub fn cutoff(&self) -> DateTime<Utc> {
        self.now
            .checked_sub_signed(self.window)
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    pub fn is_recent(&self, published_at: DateTime<Utc>) -> bool {
        published_at >= self.cutoff()
    }

    /// Keep only records inside the window. Returns how many were dropped.
    pub fn retain_recent(&self, records: &mut Vec<HeadlineRecord>) -> usize {
        let before = records.len();
        records.retain(|r| self.is_recent(r.published_at));
        before - records.len()
    }
}

/// One data provider behind a uniform contract. Implementations must never
/// panic or propagate errors: every problem becomes `SourceQueryResult::Failure`.
#[async_trait::async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Stable source identifier, e.g. `"google_news"`.
    fn name(&self) -> &str;

    async fn fetch(&self, query: &str, ctx: &FetchContext) -> SourceQueryResult;
}
