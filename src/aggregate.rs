// src/aggregate.rs
//! # Aggregator
//! Best-effort fan-out over all registered source adapters.
//!
//! Every adapter runs concurrently with its own timeout; the join waits for
//! all of them. Successful results are merged in registration order (never
//! completion order) and the recency window is re-applied to the merged set.
//! Failures only reduce completeness; if all sources fail the result is empty
//! and the report says so.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use futures::future::join_all;
use metrics::{counter, gauge};
use serde::Serialize;

use crate::clock::{Clock, SystemClock};
use crate::ingest::ensure_metrics_described;
use crate::ingest::types::{
    FetchContext, HeadlineRecord, SourceAdapter, SourceError, SourceQueryResult,
};

pub const DEFAULT_SOURCE_TIMEOUT: StdDuration = StdDuration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFailure {
    pub source: String,
    pub error: String,
    #[serde(skip)]
    pub kind: SourceError,
}

/// Merged records plus the diagnostics needed to tell "all sources failed"
/// apart from "nothing matched".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregateReport {
    pub records: Vec<HeadlineRecord>,
    pub succeeded: Vec<String>,
    pub failures: Vec<SourceFailure>,
    pub window_dropped: usize,
}

impl AggregateReport {
    /// At least one source was registered and none succeeded.
    pub fn all_sources_failed(&self) -> bool {
        self.succeeded.is_empty() && !self.failures.is_empty()
    }
}

/// Pure fold over settled adapter outcomes (given in registration order).
pub fn merge_settled(results: Vec<SourceQueryResult>, ctx: &FetchContext) -> AggregateReport {
    let mut report = AggregateReport::default();
    for res in results {
        match res {
            SourceQueryResult::Success { source, records } => {
                report.succeeded.push(source);
                report.records.extend(records);
            }
            SourceQueryResult::Failure { source, error } => {
                report.failures.push(SourceFailure {
                    source,
                    error: error.to_string(),
                    kind: error,
                });
            }
        }
    }
    report.window_dropped = ctx.retain_recent(&mut report.records);
    report
}

pub struct Aggregator {
    adapters: Vec<Box<dyn SourceAdapter>>,
    timeout: StdDuration,
    clock: Arc<dyn Clock>,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Aggregator {
    pub fn new(adapters: Vec<Box<dyn SourceAdapter>>) -> Self {
        Self {
            adapters,
            timeout: DEFAULT_SOURCE_TIMEOUT,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_adapter(mut self, adapter: Box<dyn SourceAdapter>) -> Self {
        self.adapters.push(adapter);
        self
    }

    pub fn with_timeout(mut self, timeout: StdDuration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn source_names(&self) -> Vec<&str> {
        self.adapters.iter().map(|a| a.name()).collect()
    }

    /// Merged, window-filtered records. Never fails.
    pub async fn aggregate(&self, query: &str, window: chrono::Duration) -> Vec<HeadlineRecord> {
        self.aggregate_report(query, window).await.records
    }

    pub async fn aggregate_report(&self, query: &str, window: chrono::Duration) -> AggregateReport {
        ensure_metrics_described();
        let ctx = FetchContext::new(self.clock.now(), window);

        let settled = join_all(
            self.adapters
                .iter()
                .map(|adapter| fetch_with_timeout(adapter.as_ref(), query, &ctx, self.timeout)),
        )
        .await;

        let report = merge_settled(settled, &ctx);

        counter!("ingest_window_dropped_total").increment(report.window_dropped as u64);
        gauge!("ingest_pipeline_last_run_ts").set(ctx.now.timestamp() as f64);

        if report.all_sources_failed() {
            counter!("ingest_all_sources_failed_total").increment(1);
            tracing::warn!(
                target: "ingest",
                all_sources_failed = true,
                failed = report.failures.len(),
                query,
                "every source failed; returning empty result"
            );
        } else {
            tracing::info!(
                target: "ingest",
                ok = report.succeeded.len(),
                failed = report.failures.len(),
                kept = report.records.len(),
                window_dropped = report.window_dropped,
                "aggregation settled"
            );
        }
        report
    }
}

async fn fetch_with_timeout(
    adapter: &dyn SourceAdapter,
    query: &str,
    ctx: &FetchContext,
    timeout: StdDuration,
) -> SourceQueryResult {
    match tokio::time::timeout(timeout, adapter.fetch(query, ctx)).await {
        Ok(res) => res,
        Err(_) => {
            tracing::warn!(target: "ingest", provider = adapter.name(), ?timeout, "provider timed out");
            counter!("ingest_provider_errors_total", "source" => adapter.name().to_string())
                .increment(1);
            SourceQueryResult::Failure {
                source: adapter.name().to_string(),
                error: SourceError::Unavailable(format!("timed out after {timeout:?}")),
            }
        }
    }
}
