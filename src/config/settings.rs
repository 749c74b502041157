// src/config/settings.rs
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ingest::providers::{rss_relay::Relay, ALL_SOURCES};
use crate::lexicon::LexiconError;

/// Upper bound for `window_days` (roughly a century).
pub const MAX_WINDOW_DAYS: u32 = 36_500;

fn default_window_days() -> u32 {
    90
}
fn default_display_limit() -> usize {
    6
}
fn default_source_timeout_secs() -> u64 {
    10
}
fn default_user_agent() -> String {
    concat!("headline-mood/", env!("CARGO_PKG_VERSION")).to_string()
}
fn default_relay_url() -> Option<String> {
    Some("https://api.allorigins.win/get?url=".to_string())
}
fn default_sources() -> Vec<String> {
    ALL_SOURCES.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelayMode {
    /// `{"contents": ...}` envelope (AllOrigins `get`).
    #[default]
    Json,
    /// Upstream body as is (AllOrigins `raw`, corsproxy-style relays).
    Raw,
}

/// Configuration errors, surfaced before any fetch happens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid lexicon: {0}")]
    InvalidLexicon(#[from] LexiconError),
    #[error("display_limit must be greater than zero")]
    ZeroDisplayLimit,
    #[error("window_days must be greater than zero")]
    ZeroWindow,
    #[error("window_days must be at most {max}, got {got}")]
    WindowTooLarge { got: u32, max: u32 },
    #[error("source_timeout_secs must be greater than zero")]
    ZeroTimeout,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineSettings {
    /// Recency window shared by every source, in days.
    #[serde(default = "default_window_days")]
    pub window_days: u32,
    /// Max headlines in the result.
    #[serde(default = "default_display_limit")]
    pub display_limit: usize,
    /// Per-source wall-clock budget.
    #[serde(default = "default_source_timeout_secs")]
    pub source_timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Relay prefix for RSS sources. A missing key keeps the default relay;
    /// `""` (or JSON `null`) fetches feeds directly.
    #[serde(default = "default_relay_url")]
    pub relay_url: Option<String>,
    #[serde(default)]
    pub relay_mode: RelayMode,
    /// Enabled sources, in merge order.
    #[serde(default = "default_sources")]
    pub sources: Vec<String>,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
            display_limit: default_display_limit(),
            source_timeout_secs: default_source_timeout_secs(),
            user_agent: default_user_agent(),
            relay_url: default_relay_url(),
            relay_mode: RelayMode::default(),
            sources: default_sources(),
        }
    }
}

impl PipelineSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.display_limit == 0 {
            return Err(ConfigError::ZeroDisplayLimit);
        }
        if self.window_days == 0 {
            return Err(ConfigError::ZeroWindow);
        }
        if self.window_days > MAX_WINDOW_DAYS {
            return Err(ConfigError::WindowTooLarge {
                got: self.window_days,
                max: MAX_WINDOW_DAYS,
            });
        }
        if self.source_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }

    pub fn window(&self) -> chrono::Duration {
        chrono::Duration::days(i64::from(self.window_days))
    }

    pub fn source_timeout(&self) -> Duration {
        Duration::from_secs(self.source_timeout_secs)
    }

    pub fn relay(&self) -> Relay {
        match self.relay_url.as_deref().map(str::trim) {
            None | Some("") => Relay::Direct,
            Some(base) => match self.relay_mode {
                RelayMode::Json => Relay::Json { base: base.to_string() },
                RelayMode::Raw => Relay::Raw { base: base.to_string() },
            },
        }
    }
}
