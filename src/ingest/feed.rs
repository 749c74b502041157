// src/ingest/feed.rs
//! RSS 2.0 and Atom parsing into raw entries, plus the mapping from raw
//! entries to `HeadlineRecord`s.

use anyhow::{bail, Context, Result};
use once_cell::sync::OnceCell;
use quick_xml::de::from_str;
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Deserialize;

use crate::ingest::dates::parse_timestamp;
use crate::ingest::types::{FetchContext, HeadlineRecord};

/// Source-agnostic view of one feed item before defaulting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEntry {
    pub title: Option<String>,
    pub link: Option<String>,
    pub published: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedKind {
    Rss,
    Atom,
}

/* ---------- RSS 2.0 ---------- */

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    item: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    link: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    // `<dc:date>`: element names are matched without their prefix
    #[serde(rename = "date")]
    dc_date: Option<String>,
}

/* ---------- Atom ---------- */

#[derive(Debug, Deserialize)]
struct AtomFeed {
    #[serde(rename = "entry", default)]
    entry: Vec<AtomEntry>,
}

#[derive(Debug, Deserialize)]
struct AtomEntry {
    title: Option<TextNode>,
    #[serde(default)]
    link: Vec<AtomLink>,
    published: Option<String>,
    updated: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TextNode {
    #[serde(rename = "$text", default)]
    value: String,
}

#[derive(Debug, Deserialize)]
struct AtomLink {
    #[serde(rename = "@href")]
    href: Option<String>,
    #[serde(rename = "@rel")]
    rel: Option<String>,
}

impl AtomEntry {
    /// `rel="alternate"` (or no rel, which defaults to alternate) wins over
    /// any other link relation.
    fn best_link(&self) -> Option<String> {
        let alternate = self
            .link
            .iter()
            .find(|l| l.rel.as_deref().map_or(true, |r| r == "alternate"));
        alternate
            .or_else(|| self.link.first())
            .and_then(|l| l.href.clone())
    }
}

/// Look at the root element to tell RSS from Atom.
pub fn detect_kind(xml: &str) -> Result<FeedKind> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    loop {
        match reader.read_event().context("reading feed root element")? {
            Event::Start(e) | Event::Empty(e) => {
                return match e.local_name().as_ref() {
                    b"rss" => Ok(FeedKind::Rss),
                    b"feed" => Ok(FeedKind::Atom),
                    other => bail!(
                        "unsupported feed root <{}>",
                        String::from_utf8_lossy(other)
                    ),
                };
            }
            Event::Eof => bail!("empty feed document"),
            _ => continue,
        }
    }
}

pub fn parse_rss(xml: &str) -> Result<Vec<RawEntry>> {
    let xml_clean = scrub_html_entities_for_xml(xml);
    let rss: Rss = from_str(&xml_clean).context("parsing rss xml")?;
    Ok(rss
        .channel
        .item
        .into_iter()
        .map(|it| RawEntry {
            title: it.title,
            link: it.link,
            published: it.pub_date.or(it.dc_date),
        })
        .collect())
}

pub fn parse_atom(xml: &str) -> Result<Vec<RawEntry>> {
    let xml_clean = scrub_html_entities_for_xml(xml);
    let feed: AtomFeed = from_str(&xml_clean).context("parsing atom xml")?;
    Ok(feed
        .entry
        .into_iter()
        .map(|e| RawEntry {
            link: e.best_link(),
            title: e.title.map(|t| t.value),
            published: e.published.or(e.updated),
        })
        .collect())
}

/// Parse either dialect, chosen by the document root.
pub fn parse_any(xml: &str) -> Result<Vec<RawEntry>> {
    match detect_kind(xml)? {
        FeedKind::Rss => parse_rss(xml),
        FeedKind::Atom => parse_atom(xml),
    }
}

/// Apply record defaults and the shared recency window.
/// Entries with an empty title are skipped, not treated as errors.
pub fn into_records(entries: Vec<RawEntry>, ctx: &FetchContext) -> Vec<HeadlineRecord> {
    entries
        .into_iter()
        .filter_map(|e| {
            let published = e.published.as_deref().and_then(parse_timestamp);
            HeadlineRecord::from_raw(e.title.as_deref(), e.link.as_deref(), published, ctx.now)
        })
        .filter(|r| ctx.is_recent(r.published_at))
        .collect()
}

/// HTML entities that are undefined in XML and would abort the parser.
/// Common punctuation folds to ASCII; other named entities are decoded and
/// re-escaped, unknown ones are escaped as literal text.
fn scrub_html_entities_for_xml(s: &str) -> String {
    let folded = s
        .replace("&nbsp;", " ")
        .replace("&ndash;", "-")
        .replace("&mdash;", "-")
        .replace("&ldquo;", "\"")
        .replace("&rdquo;", "\"")
        .replace("&lsquo;", "'")
        .replace("&rsquo;", "'")
        .replace("&hellip;", "...");

    static RE_NAMED: OnceCell<regex::Regex> = OnceCell::new();
    let re = RE_NAMED.get_or_init(|| regex::Regex::new(r"&([A-Za-z][A-Za-z0-9]*);").unwrap());
    re.replace_all(&folded, |caps: &regex::Captures| {
        let whole = &caps[0];
        match &caps[1] {
            "amp" | "lt" | "gt" | "quot" | "apos" => whole.to_string(),
            name => {
                let decoded = html_escape::decode_html_entities(whole);
                if decoded == whole {
                    format!("&amp;{name};")
                } else {
                    html_escape::encode_quoted_attribute(&decoded).into_owned()
                }
            }
        }
    })
    .into_owned()
}
