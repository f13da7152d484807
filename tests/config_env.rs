// tests/config_env.rs
//
// BIASLENS_CONFIG_PATH resolution. Env-mutating, so every test is serial.

use std::fs;

use serial_test::serial;

use biaslens::config::{BiaslensConfig, ENV_BIASLENS_CONFIG_PATH};
use biaslens::credibility::CredibilityTier;
use biaslens::{AnalyzeOptions, Analyzer};

#[test]
#[serial]
fn env_path_is_honoured() {
    let dir = tempfile::tempdir().expect("tempdir");
    let table = dir.path().join("credibility.json");
    fs::write(
        &table,
        r#"{ "domains": { "example-news.ng": "low" }, "aliases": {} }"#,
    )
    .expect("write table");

    let cfg_path = dir.path().join("biaslens.toml");
    fs::write(
        &cfg_path,
        format!(
            r#"
credibility_table = "{}"

[trust]
balance_bonus = 5.0

[[extra_terms]]
term = "ogoni"
category = "ethnic"
biased_contexts = ["ogoni saboteurs"]
"#,
            table.display()
        ),
    )
    .expect("write config");

    std::env::set_var(ENV_BIASLENS_CONFIG_PATH, &cfg_path);
    let cfg = BiaslensConfig::load().expect("load");
    std::env::remove_var(ENV_BIASLENS_CONFIG_PATH);

    assert_eq!(cfg.trust.balance_bonus, 5.0);
    assert_eq!(cfg.extra_terms.len(), 1);
    assert_eq!(cfg.credibility().tier_for("example-news.ng"), CredibilityTier::Low);

    let analyzer = Analyzer::from_config(&cfg);
    let report = analyzer.analyze(
        "Those ogoni saboteurs again.",
        &AnalyzeOptions {
            url: Some("https://example-news.ng/story".to_string()),
            ..Default::default()
        },
    );
    assert!(report.risk_factors.contains(&"nigerian_bias".to_string()));
    assert!(report.risk_factors.contains(&"low_credibility_source".to_string()));
}

#[test]
#[serial]
fn missing_file_gives_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::env::set_var(ENV_BIASLENS_CONFIG_PATH, dir.path().join("absent.toml"));
    let cfg = BiaslensConfig::load().expect("missing file is fine");
    std::env::remove_var(ENV_BIASLENS_CONFIG_PATH);
    assert_eq!(cfg, BiaslensConfig::default());
}

#[test]
#[serial]
fn malformed_file_errors_but_load_or_default_recovers() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[trust\nknee_low = ").expect("write");

    std::env::set_var(ENV_BIASLENS_CONFIG_PATH, &path);
    assert!(BiaslensConfig::load().is_err());
    let cfg = BiaslensConfig::load_or_default();
    std::env::remove_var(ENV_BIASLENS_CONFIG_PATH);

    assert_eq!(cfg, BiaslensConfig::default());
}
