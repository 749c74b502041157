// src/ingest/providers/json_search.rs
//! JSON search APIs (Semantic Scholar, HN Algolia, ...). Field names are
//! configurable because every API names them differently.

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ingest::dates;
use crate::ingest::http::HttpFetch;
use crate::ingest::types::{
    FetchContext, HeadlineRecord, SourceAdapter, SourceError, SourceQueryResult,
};
use crate::ingest::{expand_template, settle, timed_parse};

/// Where the items and their fields live in the response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonFields {
    /// Top-level field holding the item list; `None` when the body is a bare array.
    pub results: Option<String>,
    pub title: String,
    pub url: String,
    /// Date candidates, first parsable one wins.
    #[serde(default)]
    pub date: Vec<String>,
}

pub struct JsonSearchAdapter {
    name: String,
    url_template: String,
    fields: JsonFields,
    http: Arc<dyn HttpFetch>,
}

impl JsonSearchAdapter {
    pub fn new(
        name: impl Into<String>,
        url_template: impl Into<String>,
        fields: JsonFields,
        http: Arc<dyn HttpFetch>,
    ) -> Self {
        Self {
            name: name.into(),
            url_template: url_template.into(),
            fields,
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
        let records = timed_parse(&self.name, || parse_items(&body, &self.fields, ctx))?;
        Ok(records
            .into_iter()
            .filter(|r| ctx.is_recent(r.published_at))
            .collect())
    }
}

#[async_trait]
impl SourceAdapter for JsonSearchAdapter {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, query: &str, ctx: &FetchContext) -> SourceQueryResult {
        settle(&self.name, self.try_fetch(query, ctx).await)
    }
}

/// Parse the response body into records (no window applied here).
/// Non-object items and items without a title are skipped.
pub fn parse_items(body: &str, fields: &JsonFields, ctx: &FetchContext) -> Result<Vec<HeadlineRecord>> {
    let root: Value = serde_json::from_str(body).context("parsing json search response")?;

    let list = match &fields.results {
        Some(key) => root
            .get(key)
            .ok_or_else(|| anyhow!("missing `{key}` in response"))?,
        None => &root,
    };
    let items = list
        .as_array()
        .ok_or_else(|| anyhow!("result list is not an array"))?;

    Ok(items
        .iter()
        .filter_map(|item| {
            let obj = item.as_object()?;
            let title = obj.get(&fields.title).and_then(Value::as_str);
            let link = obj.get(&fields.url).and_then(Value::as_str);
            let published = fields
                .date
                .iter()
                .find_map(|f| obj.get(f).and_then(dates::from_json));
            HeadlineRecord::from_raw(title, link, published, ctx.now)
        })
        .collect())
}
