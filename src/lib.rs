// src/lib.rs
// Public library surface for integration tests (and reuse by other services).

pub mod aggregate;
pub mod assemble;
pub mod clock;
pub mod config;
pub mod ingest;
pub mod lexicon;
pub mod pipeline;
pub mod relevance;
pub mod sentiment;

// ---- Re-exports for stable public API ----
pub use crate::aggregate::{AggregateReport, Aggregator, SourceFailure};
pub use crate::assemble::{assemble, AggregateResult, KeywordHit};
pub use crate::clock::{Clock, FixedClock, SystemClock};
pub use crate::config::{ConfigError, PipelineSettings};
pub use crate::ingest::types::{
    FetchContext, HeadlineRecord, SourceAdapter, SourceError, SourceQueryResult,
};
pub use crate::lexicon::{KeywordLexicon, LexiconError, Polarity};
pub use crate::pipeline::Pipeline;
pub use crate::relevance::filter_relevant;
pub use crate::sentiment::{score, Mood, SentimentTally};
