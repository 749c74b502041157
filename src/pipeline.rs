// src/pipeline.rs
//! # Pipeline
//! query → aggregate (fan-out) → relevance filter → score → assemble.
//!
//! Configuration problems (bad lexicon, zero limits) fail at construction.
//! Runtime problems (sources down, garbage responses) never fail a run: the
//! worst case is an empty, neutral result.

use std::sync::Arc;

use crate::aggregate::{AggregateReport, Aggregator};
use crate::assemble::{assemble, AggregateResult};
use crate::clock::Clock;
use crate::config::{ConfigError, PipelineSettings};
use crate::ingest::types::SourceAdapter;
use crate::lexicon::KeywordLexicon;
use crate::relevance::filter_relevant;
use crate::sentiment::score;

pub struct Pipeline {
    aggregator: Aggregator,
    lexicon: KeywordLexicon,
    window: chrono::Duration,
    display_limit: usize,
}

impl Pipeline {
    pub fn new(
        adapters: Vec<Box<dyn SourceAdapter>>,
        lexicon: KeywordLexicon,
        settings: &PipelineSettings,
    ) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self {
            aggregator: Aggregator::new(adapters).with_timeout(settings.source_timeout()),
            lexicon,
            window: settings.window(),
            display_limit: settings.display_limit,
        })
    }

    /// Build the lexicon from raw term lists; overlap is reported here,
    /// before any source is contacted.
    pub fn from_terms<S: AsRef<str>>(
        adapters: Vec<Box<dyn SourceAdapter>>,
        positive: &[S],
        negative: &[S],
        settings: &PipelineSettings,
    ) -> Result<Self, ConfigError> {
        let lexicon = KeywordLexicon::new(positive, negative)?;
        Self::new(adapters, lexicon, settings)
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.aggregator = self.aggregator.with_clock(clock);
        self
    }

    pub fn lexicon(&self) -> &KeywordLexicon {
        &self.lexicon
    }

    pub async fn run(&self, query: &str) -> AggregateResult {
        self.run_with_report(query).await.0
    }

    /// Same as [`run`](Self::run), also returning the aggregation diagnostics
    /// (per-source failures, all-sources-failed flag).
    pub async fn run_with_report(&self, query: &str) -> (AggregateResult, AggregateReport) {
        let report = self.aggregator.aggregate_report(query, self.window).await;

        let relevant = filter_relevant(report.records.clone(), &self.lexicon);
        let tally = score(&relevant, &self.lexicon);
        let result = assemble(&tally, &relevant, self.display_limit);

        tracing::info!(
            target: "pipeline",
            query,
            mood = %result.mood(),
            positive = result.positive_count(),
            negative = result.negative_count(),
            relevant = relevant.len(),
            "pipeline run finished"
        );

        (result, report)
    }
}
