// tests/config_files.rs
use headline_mood::config::{
    load_lexicon_default, load_lexicon_from, load_settings_default, load_settings_from,
    ENV_LEXICON_PATH, ENV_SETTINGS_PATH,
};
use headline_mood::{KeywordLexicon, PipelineSettings};
use headline_mood::ingest::providers::rss_relay::Relay;
use std::{env, fs};

#[test]
fn settings_from_toml_and_json() {
    let dir = tempfile::tempdir().unwrap();

    let p_toml = dir.path().join("pipeline.toml");
    fs::write(
        &p_toml,
        r#"
window_days = 30
display_limit = 3
sources = ["arxiv", "hacker_news"]
"#,
    )
    .unwrap();
    let s = load_settings_from(&p_toml).unwrap();
    assert_eq!(s.window_days, 30);
    assert_eq!(s.display_limit, 3);
    assert_eq!(s.sources, ["arxiv", "hacker_news"]);
    assert_eq!(s.source_timeout_secs, 10);

    let p_json = dir.path().join("pipeline.json");
    fs::write(&p_json, r#"{"relay_url": null, "display_limit": 12}"#).unwrap();
    let sj = load_settings_from(&p_json).unwrap();
    assert_eq!(sj.relay_url, None);
    assert_eq!(sj.relay(), Relay::Direct);

    fs::write(&p_toml, "relay_url = \"\"").unwrap();
    assert_eq!(load_settings_from(&p_toml).unwrap().relay(), Relay::Direct);
    assert_eq!(sj.display_limit, 12);
    assert_eq!(sj.window_days, 90);
}

#[test]
fn invalid_settings_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("pipeline.toml");
    fs::write(&p, "display_limit = 0").unwrap();
    let err = load_settings_from(&p).unwrap_err();
    assert!(format!("{err:#}").contains("display_limit"), "{err:#}");

    fs::write(&p, "window_days = \"ninety\"").unwrap();
    assert!(load_settings_from(&p).is_err());
}

#[test]
fn lexicon_from_files() {
    let dir = tempfile::tempdir().unwrap();

    let p_toml = dir.path().join("lexicon.toml");
    fs::write(
        &p_toml,
        r#"
positive = [" Breakthrough ", "", "FDA approval", "breakthrough"]
negative = ["Recall"]
"#,
    )
    .unwrap();
    let lx = load_lexicon_from(&p_toml).unwrap();
    assert_eq!(lx.positive_terms(), ["breakthrough", "fda approval"]);
    assert_eq!(lx.negative_terms(), ["recall"]);

    let p_json = dir.path().join("lexicon.json");
    fs::write(&p_json, r#"{"positive": ["growth"], "negative": ["Growth"]}"#).unwrap();
    let err = load_lexicon_from(&p_json).unwrap_err();
    assert!(format!("{err:#}").contains("growth"), "{err:#}");
}

#[test]
fn shipped_config_files_parse() {
    let root = env!("CARGO_MANIFEST_DIR");
    let s = load_settings_from(format!("{root}/config/pipeline.toml").as_ref()).unwrap();
    assert_eq!(s, PipelineSettings::default());
    let lx = load_lexicon_from(format!("{root}/config/lexicon.toml").as_ref()).unwrap();
    assert_eq!(lx, KeywordLexicon::default_seed());
}

#[serial_test::serial]
#[test]
fn default_lookup_uses_env_then_config_dir_then_builtins() {
    // isolate cwd so the repo's own config/ is not picked up
    let old = env::current_dir().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    env::set_current_dir(tmp.path()).unwrap();
    env::remove_var(ENV_SETTINGS_PATH);
    env::remove_var(ENV_LEXICON_PATH);

    // 1) nothing on disk -> built-ins
    assert_eq!(load_settings_default().unwrap(), PipelineSettings::default());
    assert_eq!(load_lexicon_default().unwrap(), KeywordLexicon::default_seed());

    // 2) ./config/ fallback, toml before json
    let cfg_dir = tmp.path().join("config");
    fs::create_dir_all(&cfg_dir).unwrap();
    fs::write(cfg_dir.join("pipeline.json"), r#"{"display_limit": 9}"#).unwrap();
    assert_eq!(load_settings_default().unwrap().display_limit, 9);
    fs::write(cfg_dir.join("pipeline.toml"), "display_limit = 4").unwrap();
    assert_eq!(load_settings_default().unwrap().display_limit, 4);

    fs::write(cfg_dir.join("lexicon.json"), r#"{"positive": ["surge"]}"#).unwrap();
    let lx = load_lexicon_default().unwrap();
    assert_eq!(lx.positive_terms(), ["surge"]);
    assert!(lx.negative_terms().is_empty());

    // 3) env wins
    let p_env = tmp.path().join("custom.toml");
    fs::write(&p_env, "display_limit = 2").unwrap();
    env::set_var(ENV_SETTINGS_PATH, p_env.display().to_string());
    assert_eq!(load_settings_default().unwrap().display_limit, 2);

    // 4) env pointing nowhere is an error, not a silent fallback
    env::set_var(ENV_SETTINGS_PATH, tmp.path().join("missing.toml").display().to_string());
    assert!(load_settings_default().is_err());
    env::remove_var(ENV_SETTINGS_PATH);

    env::set_current_dir(&old).unwrap();
}
