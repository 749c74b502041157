// tests/providers_atom_api.rs
mod common;

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use common::*;
use headline_mood::ingest::providers::atom_api::AtomApiAdapter;
use headline_mood::{FetchContext, SourceAdapter, SourceError, SourceQueryResult};

const ARXIV_TEMPLATE: &str =
    "https://export.arxiv.org/api/query?search_query=all:{query}&max_results=50";

fn arxiv(http: CannedHttp) -> (AtomApiAdapter, Arc<CannedHttp>) {
    let http = Arc::new(http);
    (AtomApiAdapter::new("arxiv", ARXIV_TEMPLATE, http.clone()), http)
}

#[tokio::test]
async fn arxiv_entries_map_to_records() {
    let (adapter, http) = arxiv(CannedHttp::new().route("export.arxiv.org", ARXIV_ATOM));
    let ctx = FetchContext::new(test_now(), Duration::days(90));

    let res = adapter.fetch("neural decoding", &ctx).await;
    let SourceQueryResult::Success { records, .. } = res else {
        panic!("expected success, got {res:?}");
    };

    // 2024 paper falls outside the window
    assert_eq!(records.len(), 1);
    let r = &records[0];
    assert_eq!(r.title, "A Breakthrough in Neural Decoding for Brain-Computer Interfaces");
    assert_eq!(r.link, "http://arxiv.org/abs/2510.01234v1");
    assert_eq!(r.published_at, Utc.with_ymd_and_hms(2025, 10, 1, 17, 59, 59).unwrap());

    // direct fetch, no relay
    assert_eq!(
        http.calls(),
        ["https://export.arxiv.org/api/query?search_query=all:neural%20decoding&max_results=50"]
    );
}

#[tokio::test]
async fn wider_window_keeps_older_entries() {
    let (adapter, _) = arxiv(CannedHttp::new().route("export.arxiv.org", ARXIV_ATOM));
    let ctx = FetchContext::new(test_now(), Duration::days(730));
    let res = adapter.fetch("biotech", &ctx).await;
    let SourceQueryResult::Success { records, .. } = res else {
        panic!("expected success, got {res:?}");
    };
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].title, "Growth curves of engineered microbial consortia");
}

#[tokio::test]
async fn rss_body_is_not_accepted_as_atom() {
    let (adapter, _) = arxiv(CannedHttp::new().route("export.arxiv.org", GOOGLE_RSS));
    let ctx = FetchContext::new(test_now(), Duration::days(90));
    let res = adapter.fetch("biotech", &ctx).await;
    assert!(matches!(
        res,
        SourceQueryResult::Failure { error: SourceError::MalformedResponse(_), .. }
    ));
}
