// src/ingest/providers/mod.rs
//! Built-in source catalogue.

pub mod atom_api;
pub mod json_search;
pub mod rss_relay;

use std::sync::Arc;

use crate::config::PipelineSettings;
use crate::ingest::http::HttpFetch;
use crate::ingest::types::SourceAdapter;

use atom_api::AtomApiAdapter;
use json_search::{JsonFields, JsonSearchAdapter};
use rss_relay::{Relay, RssRelayAdapter};

pub const GOOGLE_NEWS: &str = "google_news";
pub const BING_NEWS: &str = "bing_news";
pub const YAHOO_NEWS: &str = "yahoo_news";
pub const REDDIT: &str = "reddit";
pub const ARXIV: &str = "arxiv";
pub const SEMANTIC_SCHOLAR: &str = "semantic_scholar";
pub const HACKER_NEWS: &str = "hacker_news";

/// Registration order of the built-ins (also the merge order).
pub const ALL_SOURCES: &[&str] = &[
    GOOGLE_NEWS,
    BING_NEWS,
    YAHOO_NEWS,
    REDDIT,
    ARXIV,
    SEMANTIC_SCHOLAR,
    HACKER_NEWS,
];

const GOOGLE_NEWS_URL: &str =
    "https://news.google.com/rss/search?q={query}&hl=en-US&gl=US&ceid=US:en";
const BING_NEWS_URL: &str = "https://www.bing.com/news/search?q={query}&format=RSS";
const YAHOO_NEWS_URL: &str = "https://news.search.yahoo.com/rss?p={query}";
const REDDIT_URL: &str = "https://www.reddit.com/r/{subreddit}/.rss";
const ARXIV_URL: &str = "https://export.arxiv.org/api/query?search_query=all:{query}&sortBy=submittedDate&sortOrder=descending&max_results=50";
const SEMANTIC_SCHOLAR_URL: &str = "https://api.semanticscholar.org/graph/v1/paper/search?query={query}&fields=title,url,year,publicationDate&limit=50";
const HACKER_NEWS_URL: &str =
    "https://hn.algolia.com/api/v1/search_by_date?query={query}&tags=story&hitsPerPage=50";

pub const FALLBACK_SUBREDDIT: &str = "science";

const SUBREDDITS: &[(&str, &str)] = &[
    ("biotech", "biotech"),
    ("medtech", "medtech"),
    ("diagnostics", "labrats"),
    ("neurotechnology", "neurotechnology"),
    ("ai healthcare", "HealthIT"),
    ("robotic surgery", "surgery"),
    ("digital health", "digitalhealth"),
    ("biomaterials", "materials"),
    ("regenerative medicine", "regenerativemedicine"),
];

/// Forum for a sector query: exact (case-insensitive) sector first, then the
/// first word against each sector's first word, then `science`.
pub fn subreddit_for_sector(sector: &str) -> &'static str {
    let s = sector.trim().to_lowercase();
    if let Some((_, sub)) = SUBREDDITS.iter().find(|(k, _)| *k == s) {
        return sub;
    }
    let Some(first) = s.split_whitespace().next() else {
        return FALLBACK_SUBREDDIT;
    };
    SUBREDDITS
        .iter()
        .find(|(k, _)| k.split_whitespace().next() == Some(first))
        .map(|(_, sub)| *sub)
        .unwrap_or(FALLBACK_SUBREDDIT)
}

/// Build one built-in adapter by name.
pub fn build_adapter(
    name: &str,
    relay: &Relay,
    http: Arc<dyn HttpFetch>,
) -> Option<Box<dyn SourceAdapter>> {
    let adapter: Box<dyn SourceAdapter> = match name {
        GOOGLE_NEWS => Box::new(RssRelayAdapter::new(name, GOOGLE_NEWS_URL, relay.clone(), http)),
        BING_NEWS => Box::new(RssRelayAdapter::new(name, BING_NEWS_URL, relay.clone(), http)),
        YAHOO_NEWS => Box::new(RssRelayAdapter::new(name, YAHOO_NEWS_URL, relay.clone(), http)),
        REDDIT => Box::new(RssRelayAdapter::new(name, REDDIT_URL, relay.clone(), http)),
        ARXIV => Box::new(AtomApiAdapter::new(name, ARXIV_URL, http)),
        SEMANTIC_SCHOLAR => Box::new(JsonSearchAdapter::new(
            name,
            SEMANTIC_SCHOLAR_URL,
            JsonFields {
                results: Some("data".into()),
                title: "title".into(),
                url: "url".into(),
                date: vec!["publicationDate".into(), "year".into()],
            },
            http,
        )),
        HACKER_NEWS => Box::new(JsonSearchAdapter::new(
            name,
            HACKER_NEWS_URL,
            JsonFields {
                results: Some("hits".into()),
                title: "title".into(),
                url: "url".into(),
                date: vec!["created_at".into(), "created_at_i".into()],
            },
            http,
        )),
        _ => return None,
    };
    Some(adapter)
}

/// Adapters for every source enabled in the settings, in settings order.
/// Unknown names are logged and skipped.
pub fn default_adapters(
    settings: &PipelineSettings,
    http: Arc<dyn HttpFetch>,
) -> Vec<Box<dyn SourceAdapter>> {
    let relay = settings.relay();
    settings
        .sources
        .iter()
        .filter_map(|name| {
            let a = build_adapter(name, &relay, http.clone());
            if a.is_none() {
                tracing::warn!(target: "ingest", source = %name, "unknown source in settings, skipping");
            }
            a
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subreddit_mapping() {
        assert_eq!(subreddit_for_sector("Biotech"), "biotech");
        assert_eq!(subreddit_for_sector("diagnostics"), "labrats");
        assert_eq!(subreddit_for_sector("AI healthcare"), "HealthIT");
        assert_eq!(subreddit_for_sector("robotic arms"), "surgery");
        assert_eq!(subreddit_for_sector("biotech OR medtech"), "biotech");
        assert_eq!(subreddit_for_sector("quantum computing"), FALLBACK_SUBREDDIT);
        assert_eq!(subreddit_for_sector("   "), FALLBACK_SUBREDDIT);
    }

    #[test]
    fn every_builtin_builds() {
        struct Never;
        #[async_trait::async_trait]
        impl HttpFetch for Never {
            async fn get_text(&self, _url: &str) -> Result<String, crate::ingest::types::SourceError> {
                unreachable!()
            }
        }
        let http: Arc<dyn HttpFetch> = Arc::new(Never);
        for name in ALL_SOURCES {
            let a = build_adapter(name, &Relay::Direct, http.clone()).unwrap();
            assert_eq!(a.name(), *name);
        }
        assert!(build_adapter("myspace", &Relay::Direct, http).is_none());
    }
}
