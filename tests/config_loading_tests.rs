/// Integration tests for loading the estimator configuration from disk
use devreon_estimator::config::load_config;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = load_config(&dir.path().join("absent.toml")).unwrap();

    assert_eq!(cfg.catalog.project_types.len(), 5);
    assert_eq!(cfg.catalog.timelines.len(), 3);
    assert!(cfg.gemini.api_key.is_none());
    assert!(cfg.gemini.active_api_key().is_none());
}

#[test]
fn test_load_custom_catalog() {
    let file = write_config(
        r#"
[gemini]
api_key = "AIza-from-file"
timeout_seconds = 20

[[catalog.project_types]]
id = "portfolio"
label = "Portfolio Site"
cost = 20000

[[catalog.features]]
id = "blog"
label = "Blog"
cost = 3000

[[catalog.timelines]]
id = "rush"
label = "Urgent"
multiplier = 1.3

[[catalog.timelines]]
id = "relaxed"
label = "Flexible"
multiplier = 0.9
"#,
    );

    let cfg = load_config(file.path()).unwrap();
    assert_eq!(cfg.gemini.active_api_key(), Some("AIza-from-file"));
    assert_eq!(cfg.gemini.timeout_seconds, Some(20));
    assert_eq!(cfg.gemini.max_output_tokens, 300);
    assert_eq!(cfg.catalog.project_type("portfolio").unwrap().cost, 20000);
    assert_eq!(cfg.catalog.feature("blog").unwrap().label, "Blog");
    assert_eq!(cfg.catalog.timeline("relaxed").unwrap().multiplier, 0.9);
}

#[test]
fn test_invalid_catalog_is_rejected() {
    let file = write_config(
        r#"
[[catalog.project_types]]
id = "site"
label = "Site"
cost = 1000

[[catalog.project_types]]
id = "site"
label = "Site again"
cost = 2000

[[catalog.timelines]]
id = "standard"
label = "Standard"
multiplier = 1.0
"#,
    );

    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("Duplicate project type id: site"));
}

#[test]
fn test_negative_cost_fails_to_deserialize() {
    let file = write_config(
        r#"
[[catalog.project_types]]
id = "site"
label = "Site"
cost = -5

[[catalog.timelines]]
id = "standard"
label = "Standard"
multiplier = 1.0
"#,
    );

    assert!(load_config(file.path()).is_err());
}

#[test]
fn test_environment_overrides_file() {
    let file = write_config(
        r#"
[gemini]
model = "gemini-from-file"
"#,
    );

    std::env::set_var("DEVREON_ESTIMATOR__GEMINI__MODEL", "gemini-from-env");
    let cfg = load_config(file.path());
    std::env::remove_var("DEVREON_ESTIMATOR__GEMINI__MODEL");

    assert_eq!(cfg.unwrap().gemini.model, "gemini-from-env");
}

#[test]
fn test_max_cost_catalog_prices_without_overflow() {
    use devreon_estimator::session::{EstimatorSession, NextOutcome};

    let file = write_config(
        r#"
[[catalog.project_types]]
id = "big"
label = "Big"
cost = 9223372036854775807

[[catalog.features]]
id = "a"
label = "A"
cost = 9223372036854775807

[[catalog.features]]
id = "b"
label = "B"
cost = 9223372036854775807

[[catalog.timelines]]
id = "standard"
label = "Standard"
multiplier = 1.0
"#,
    );

    let cfg = load_config(file.path()).unwrap();
    let mut session = EstimatorSession::new(cfg.catalog);
    session.select_project_type("big").unwrap();
    session.set_feature("a", true).unwrap();
    session.set_feature("b", true).unwrap();
    while let NextOutcome::Advanced(_) = session.next() {}

    let estimate = session.calculate();
    assert_eq!(estimate.subtotal, u64::MAX);
    assert_eq!(estimate.total_max, u64::MAX);
}
