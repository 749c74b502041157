// src/ingest/providers/atom_api.rs
use std::sync::Arc;

use async_trait::async_trait;

use crate::ingest::feed::{self, FeedKind};
use crate::ingest::http::HttpFetch;
use crate::ingest::types::{
    FetchContext, HeadlineRecord, SourceAdapter, SourceError, SourceQueryResult,
};
use crate::ingest::{expand_template, settle, timed_parse};

/// Atom query API (e.g. arXiv `export.arxiv.org/api/query`), fetched directly.
pub struct AtomApiAdapter {
    name: String,
    url_template: String,
    http: Arc<dyn HttpFetch>,
}

impl AtomApiAdapter {
    pub fn new(
        name: impl Into<String>,
        url_template: impl Into<String>,
        http: Arc<dyn HttpFetch>,
    ) -> Self {
        Self {
            name: name.into(),
            url_template: url_template.into(),
            http,
        }
    }

    pub fn request_url(&self, query: &str) -> String {
        expand_template(&self.url_template, query)
    }

    async fn try_fetch(
        &self,
        query: &str,
        ctx: &FetchContext,
    ) -> Result<Vec<HeadlineRecord>, SourceError> {
        let body = self.http.get_text(&self.request_url(query)).await?;
        let entries = timed_parse(&self.name, || {
            anyhow::ensure!(
                feed::detect_kind(&body)? == FeedKind::Atom,
                "expected an Atom feed"
            );
            feed::parse_atom(&body)
        })?;
        Ok(feed::into_records(entries, ctx))
    }
}

#[async_trait]
impl SourceAdapter for AtomApiAdapter {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, query: &str, ctx: &FetchContext) -> SourceQueryResult {
        settle(&self.name, self.try_fetch(query, ctx).await)
    }
}
