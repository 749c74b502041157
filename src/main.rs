//! headline-mood demo entrypoint.
//! Runs one pipeline pass for the query given on the command line and prints
//! the `AggregateResult` as JSON.
//!
//! Usage: `headline-mood biotech OR medtech`

use std::sync::Arc;

use anyhow::{bail, Context};
use headline_mood::config::{load_lexicon_default, load_settings_default};
use headline_mood::ingest::http::ReqwestFetch;
use headline_mood::ingest::providers::default_adapters;
use headline_mood::Pipeline;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Compact logs to stderr; `RUST_LOG` overrides the default filter.
/// `HEADLINE_MOOD_LOG_JSON=1` switches to JSON lines.
fn enable_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("headline_mood=info,ingest=info,pipeline=info,warn"));

    let json = std::env::var("HEADLINE_MOOD_LOG_JSON")
        .ok()
        .is_some_and(|v| v == "1");

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    enable_tracing();

    let query = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if query.trim().is_empty() {
        bail!("usage: headline-mood <query>");
    }

    let settings = load_settings_default().context("loading pipeline settings")?;
    let lexicon = load_lexicon_default().context("loading keyword lexicon")?;

    let http = Arc::new(ReqwestFetch::new(
        &settings.user_agent,
        settings.source_timeout(),
    )?);
    let adapters = default_adapters(&settings, http);
    let pipeline = Pipeline::new(adapters, lexicon, &settings)?;

    // an all-failed run is already logged by the aggregator
    let result = pipeline.run(&query).await;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
