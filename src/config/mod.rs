// src/config/mod.rs
//! File-based configuration for the demo binary and embedding services.
//!
//! Lookup order for both files:
//! 1) explicit env var (`HEADLINE_MOOD_CONFIG` / `HEADLINE_MOOD_LEXICON`)
//! 2) `config/<name>.toml`
//! 3) `config/<name>.json`
//! 4) built-in defaults

pub mod settings;

pub use settings::{ConfigError, PipelineSettings, RelayMode, MAX_WINDOW_DAYS};

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::lexicon::KeywordLexicon;

pub const ENV_SETTINGS_PATH: &str = "HEADLINE_MOOD_CONFIG";
pub const ENV_LEXICON_PATH: &str = "HEADLINE_MOOD_LEXICON";

fn ext_of(path: &Path) -> String {
    path.extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase()
}

/// Env path (must exist if set), then `config/<stem>.toml`, then `.json`.
fn resolve_path(env_var: &str, stem: &str) -> Result<Option<PathBuf>> {
    if let Ok(p) = std::env::var(env_var) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return Ok(Some(pb));
        }
        return Err(anyhow!("{env_var} points to non-existent path {}", pb.display()));
    }
    for ext in ["toml", "json"] {
        let p = PathBuf::from(format!("config/{stem}.{ext}"));
        if p.exists() {
            return Ok(Some(p));
        }
    }
    Ok(None)
}

/* ---------- settings ---------- */

pub fn load_settings_from(path: &Path) -> Result<PipelineSettings> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading settings from {}", path.display()))?;
    let settings: PipelineSettings = match ext_of(path).as_str() {
        "json" => serde_json::from_str(&content).context("parsing settings json")?,
        _ => toml::from_str(&content).context("parsing settings toml")?,
    };
    settings.validate()?;
    Ok(settings)
}

pub fn load_settings_default() -> Result<PipelineSettings> {
    match resolve_path(ENV_SETTINGS_PATH, "pipeline")? {
        Some(p) => load_settings_from(&p),
        None => Ok(PipelineSettings::default()),
    }
}

/* ---------- lexicon ---------- */

#[derive(Debug, Deserialize)]
struct LexiconFile {
    #[serde(default)]
    positive: Vec<String>,
    #[serde(default)]
    negative: Vec<String>,
}

/// Blank entries in files are dropped (editor leftovers), unlike the
/// programmatic constructor which rejects them.
fn parse_lexicon(s: &str, hint_ext: &str) -> Result<KeywordLexicon> {
    let file: LexiconFile = if hint_ext == "json" {
        serde_json::from_str(s).context("parsing lexicon json")?
    } else {
        toml::from_str(s).context("parsing lexicon toml")?
    };
    let keep = |v: Vec<String>| -> Vec<String> {
        v.into_iter().filter(|t| !t.trim().is_empty()).collect()
    };
    Ok(KeywordLexicon::new(keep(file.positive), keep(file.negative))?)
}

pub fn load_lexicon_from(path: &Path) -> Result<KeywordLexicon> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading lexicon from {}", path.display()))?;
    parse_lexicon(&content, &ext_of(path))
}

pub fn load_lexicon_default() -> Result<KeywordLexicon> {
    match resolve_path(ENV_LEXICON_PATH, "lexicon")? {
        Some(p) => load_lexicon_from(&p),
        None => Ok(KeywordLexicon::default_seed()),
    }
}
