// src/assemble.rs
//! Final, render-ready result of one pipeline run.

use serde::Serialize;

use crate::ingest::types::HeadlineRecord;
use crate::sentiment::{Mood, SentimentTally};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordHit {
    pub term: String,
    pub count: usize,
}

/// Immutable output handed to the presentation layer. Nothing here needs to
/// be re-derived by the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateResult {
    mood: Mood,
    mood_label: &'static str,
    positive_count: usize,
    negative_count: usize,
    ranked_keywords: Vec<KeywordHit>,
    top_headlines: Vec<HeadlineRecord>,
    matched_headlines: usize,
}

impl AggregateResult {
    pub fn mood(&self) -> Mood {
        self.mood
    }

    pub fn positive_count(&self) -> usize {
        self.positive_count
    }

    pub fn negative_count(&self) -> usize {
        self.negative_count
    }

    /// Count descending, ties in lexicon order.
    pub fn ranked_keywords(&self) -> &[KeywordHit] {
        &self.ranked_keywords
    }

    /// First `display_limit` relevant headlines in arrival order.
    pub fn top_headlines(&self) -> &[HeadlineRecord] {
        &self.top_headlines
    }

    /// Relevant headlines before truncation.
    pub fn matched_headlines(&self) -> usize {
        self.matched_headlines
    }

    pub fn is_empty(&self) -> bool {
        self.matched_headlines == 0
    }
}

/// Rank hits by count (stable on lexicon order) and truncate the headlines.
pub fn assemble(
    tally: &SentimentTally,
    records: &[HeadlineRecord],
    display_limit: usize,
) -> AggregateResult {
    let mut ranked: Vec<KeywordHit> = tally
        .term_order()
        .iter()
        .filter_map(|term| {
            let count = tally.hits(term);
            (count > 0).then(|| KeywordHit {
                term: term.clone(),
                count,
            })
        })
        .collect();
    // sort_by is stable: equal counts keep lexicon order
    ranked.sort_by(|a, b| b.count.cmp(&a.count));

    let mood = tally.mood();
    AggregateResult {
        mood,
        mood_label: mood.label(),
        positive_count: tally.positive_count,
        negative_count: tally.negative_count,
        ranked_keywords: ranked,
        top_headlines: records.iter().take(display_limit).cloned().collect(),
        matched_headlines: records.len(),
    }
}
