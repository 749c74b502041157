// src/sentiment.rs
//! Keyword tally and the three-way mood verdict.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::ingest::types::HeadlineRecord;
use crate::lexicon::{KeywordLexicon, Polarity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Positive,
    Neutral,
    Negative,
}

impl Mood {
    /// Pure function of the totals. Ties, including 0/0, are neutral.
    pub fn from_counts(positive: usize, negative: usize) -> Self {
        use std::cmp::Ordering::*;
        match positive.cmp(&negative) {
            Greater => Mood::Positive,
            Equal => Mood::Neutral,
            Less => Mood::Negative,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mood::Positive => "Mostly Positive",
            Mood::Neutral => "Neutral",
            Mood::Negative => "Mostly Negative",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Mood::Positive => "positive",
            Mood::Neutral => "neutral",
            Mood::Negative => "negative",
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Accumulator for one scoring pass. `keyword_hits` never stores zero counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SentimentTally {
    pub positive_count: usize,
    pub negative_count: usize,
    keyword_hits: HashMap<String, usize>,
    // lexicon enumeration order, used for tie-breaking when ranking
    term_order: Vec<String>,
}

impl SentimentTally {
    /// Fresh, empty tally bound to the lexicon's term order.
    pub fn for_lexicon(lexicon: &KeywordLexicon) -> Self {
        Self {
            term_order: lexicon.terms().map(|(t, _)| t.to_string()).collect(),
            ..Self::default()
        }
    }

    fn record_hit(&mut self, term: &str, polarity: Polarity) {
        match polarity {
            Polarity::Positive => self.positive_count += 1,
            Polarity::Negative => self.negative_count += 1,
        }
        *self.keyword_hits.entry(term.to_string()).or_insert(0) += 1;
    }

    /// Hits for one term (0 when absent).
    pub fn hits(&self, term: &str) -> usize {
        self.keyword_hits.get(term).copied().unwrap_or(0)
    }

    pub fn keyword_hits(&self) -> &HashMap<String, usize> {
        &self.keyword_hits
    }

    /// Terms in lexicon enumeration order.
    pub fn term_order(&self) -> &[String] {
        &self.term_order
    }

    pub fn mood(&self) -> Mood {
        Mood::from_counts(self.positive_count, self.negative_count)
    }
}

/// One full pass: every (record, term) match counts once, so a single title
/// can feed several terms and both polarities.
pub fn score(records: &[HeadlineRecord], lexicon: &KeywordLexicon) -> SentimentTally {
    let mut tally = SentimentTally::for_lexicon(lexicon);
    for r in records {
        let text = r.title.to_lowercase();
        for (term, polarity) in lexicon.terms() {
            if text.contains(term) {
                tally.record_hit(term, polarity);
            }
        }
    }
    tally
}
