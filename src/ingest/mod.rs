// src/ingest/mod.rs
pub mod dates;
pub mod feed;
pub mod http;
pub mod providers;
pub mod types;

use crate::ingest::types::{HeadlineRecord, SourceError, SourceQueryResult};
use metrics::{counter, describe_counter, describe_gauge, describe_histogram};
use once_cell::sync::OnceCell;

/// One-time metrics registration (so series show up once a recorder is installed).
pub(crate) fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("ingest_events_total", "Records produced by source adapters.");
        describe_counter!(
            "ingest_provider_errors_total",
            "Source adapter fetch/parse/timeout failures."
        );
        describe_counter!(
            "ingest_window_dropped_total",
            "Records dropped by the recency window at merge time."
        );
        describe_counter!(
            "ingest_all_sources_failed_total",
            "Pipeline runs in which every source failed."
        );
        describe_histogram!("ingest_parse_ms", "Adapter parse time in milliseconds.");
        describe_gauge!(
            "ingest_pipeline_last_run_ts",
            "Unix ts when the aggregation last ran."
        );
    });
}

/// Normalize a title: decode entities, strip tags, fold typographic quotes,
/// collapse whitespace.
pub fn normalize_text(s: &str) -> String {
    // 1) HTML entity decode
    let mut out = html_escape::decode_html_entities(s).to_string();

    // 2) Strip HTML tags
    static RE_TAGS: OnceCell<regex::Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| regex::Regex::new(r"(?is)</?[^>]+>").unwrap());
    out = re_tags.replace_all(&out, "").to_string();

    // 3) Normalize “ ” ‘ ’ « » to ASCII quotes
    out = out
        .replace(['\u{201C}', '\u{201D}', '\u{00AB}', '\u{00BB}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'");

    // 4) Collapse whitespace (incl. NBSP)
    static RE_WS: OnceCell<regex::Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| regex::Regex::new(r"\s+").unwrap());
    re_ws.replace_all(&out, " ").trim().to_string()
}

/// Fill a source URL template.
/// - `{query}`     → percent-encoded query (operators like `OR` pass through as words)
/// - `{subreddit}` → forum for the query's sector, see [`providers::subreddit_for_sector`]
pub fn expand_template(template: &str, query: &str) -> String {
    let mut url = template.replace("{query}", &urlencoding::encode(query.trim()));
    if url.contains("{subreddit}") {
        url = url.replace("{subreddit}", providers::subreddit_for_sector(query));
    }
    url
}

/// Turn an adapter's internal result into the tagged outcome, with logging
/// and counters. This is the adapter boundary: nothing propagates past it.
pub(crate) fn settle(
    source: &str,
    outcome: Result<Vec<HeadlineRecord>, SourceError>,
) -> SourceQueryResult {
    ensure_metrics_described();
    match outcome {
        Ok(records) => {
            counter!("ingest_events_total", "source" => source.to_string())
                .increment(records.len() as u64);
            tracing::debug!(target: "ingest", provider = source, kept = records.len(), "source ok");
            SourceQueryResult::Success {
                source: source.to_string(),
                records,
            }
        }
        Err(error) => {
            tracing::warn!(target: "ingest", provider = source, error = %error, "provider error");
            counter!("ingest_provider_errors_total", "source" => source.to_string()).increment(1);
            SourceQueryResult::Failure {
                source: source.to_string(),
                error,
            }
        }
    }
}

/// Time a parse step into the `ingest_parse_ms` histogram and classify its
/// error as a malformed response.
pub(crate) fn timed_parse<T>(
    source: &str,
    parse: impl FnOnce() -> anyhow::Result<T>,
) -> Result<T, SourceError> {
    let t0 = std::time::Instant::now();
    let res = parse();
    let ms = t0.elapsed().as_secs_f64() * 1_000.0;
    metrics::histogram!("ingest_parse_ms", "source" => source.to_string()).record(ms);
    res.map_err(|e| SourceError::MalformedResponse(format!("{e:#}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_text_strips_markup_and_keeps_punctuation() {
        let s = "  <b>Is&nbsp;&nbsp;AI</b> a \u{201C}bubble\u{201D}?  ";
        assert_eq!(normalize_text(s), r#"Is AI a "bubble"?"#);
    }

    #[test]
    fn normalize_text_empty_stays_empty() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text("  <br/>  "), "");
    }

    #[test]
    fn template_encodes_query_verbatim() {
        let url = expand_template("https://x.test/rss?q={query}&hl=en", "biotech OR medtech");
        assert_eq!(url, "https://x.test/rss?q=biotech%20OR%20medtech&hl=en");
    }

    #[test]
    fn template_resolves_subreddit() {
        let url = expand_template("https://www.reddit.com/r/{subreddit}/.rss", "digital health");
        assert_eq!(url, "https://www.reddit.com/r/digitalhealth/.rss");
    }

    #[test]
    fn settle_tags_both_outcomes() {
        let ok = settle("a", Ok(vec![]));
        assert!(ok.is_success());
        let err = settle("b", Err(SourceError::Unavailable("down".into())));
        assert!(!err.is_success());
        assert_eq!(err.source(), "b");
    }
}
