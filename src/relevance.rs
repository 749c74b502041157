// src/relevance.rs
//! Relevance gate: keep headlines that mention at least one lexicon term.

use crate::ingest::types::HeadlineRecord;
use crate::lexicon::KeywordLexicon;

/// Order-preserving filter. An empty lexicon keeps everything.
pub fn filter_relevant(records: Vec<HeadlineRecord>, lexicon: &KeywordLexicon) -> Vec<HeadlineRecord> {
    if lexicon.is_empty() {
        return records;
    }
    records
        .into_iter()
        .filter(|r| lexicon.matches_any(&r.title))
        .collect()
}
