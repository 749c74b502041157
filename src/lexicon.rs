// src/lexicon.rs
//! # Keyword Lexicon
//!
//! Two disjoint, ordered term lists driving both relevance filtering and
//! sentiment tallying.
//!
//! - Terms are trimmed and lowercased on construction.
//! - Phrases are opaque: "clinical trial" matches as one contiguous substring.
//! - Duplicates inside one list collapse to the first occurrence.
//! - A term present in both lists, or a blank term, is a configuration error.

use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Positive,
    Negative,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexiconError {
    #[error("term `{term}` is listed as both positive and negative")]
    Overlap { term: String },
    #[error("blank term in {polarity:?} list")]
    BlankTerm { polarity: Polarity },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KeywordLexicon {
    positive: Vec<String>,
    negative: Vec<String>,
}

fn clean_terms<I, S>(terms: I, polarity: Polarity) -> Result<Vec<String>, LexiconError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for t in terms {
        let t = t.as_ref().trim().to_lowercase();
        if t.is_empty() {
            return Err(LexiconError::BlankTerm { polarity });
        }
        if seen.insert(t.clone()) {
            out.push(t);
        }
    }
    Ok(out)
}

impl KeywordLexicon {
    pub fn new<P, N, S>(positive: P, negative: N) -> Result<Self, LexiconError>
    where
        P: IntoIterator<Item = S>,
        N: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let positive = clean_terms(positive, Polarity::Positive)?;
        let negative = clean_terms(negative, Polarity::Negative)?;

        let pos_set: HashSet<&str> = positive.iter().map(String::as_str).collect();
        if let Some(term) = negative.iter().find(|t| pos_set.contains(t.as_str())) {
            return Err(LexiconError::Overlap { term: term.clone() });
        }

        Ok(Self { positive, negative })
    }

    /// Lexicon with no terms (relevance filter becomes a no-op).
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn positive_terms(&self) -> &[String] {
        &self.positive
    }

    pub fn negative_terms(&self) -> &[String] {
        &self.negative
    }

    pub fn is_empty(&self) -> bool {
        self.positive.is_empty() && self.negative.is_empty()
    }

    pub fn len(&self) -> usize {
        self.positive.len() + self.negative.len()
    }

    /// All terms in enumeration order: positive first, then negative,
    /// each in declared order.
    pub fn terms(&self) -> impl Iterator<Item = (&str, Polarity)> + '_ {
        self.positive
            .iter()
            .map(|t| (t.as_str(), Polarity::Positive))
            .chain(self.negative.iter().map(|t| (t.as_str(), Polarity::Negative)))
    }

    /// True if `text` (any case) contains at least one term.
    pub fn matches_any(&self, text: &str) -> bool {
        let lowered = text.to_lowercase();
        self.terms().any(|(t, _)| lowered.contains(t))
    }

    /// Built-in innovation-sector vocabulary.
    pub fn default_seed() -> Self {
        const POSITIVE: &[&str] = &[
            "breakthrough",
            "growth",
            "approval",
            "approved",
            "funding",
            "innovation",
            "innovative",
            "launch",
            "partnership",
            "record",
            "success",
            "surge",
            "milestone",
            "promising",
            "expands",
            "raises",
            "boost",
            "cures",
        ];
        const NEGATIVE: &[&str] = &[
            "decline",
            "layoffs",
            "lawsuit",
            "recall",
            "failure",
            "fails",
            "losses",
            "delay",
            "halt",
            "fraud",
            "bankruptcy",
            "warning",
            "cuts",
            "crisis",
            "setback",
            "rejected",
            "investigation",
            "shortage",
        ];
        // Disjoint by construction.
        Self {
            positive: POSITIVE.iter().map(|s| s.to_string()).collect(),
            negative: NEGATIVE.iter().map(|s| s.to_string()).collect(),
        }
    }
}
