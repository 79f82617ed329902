//! Tests for deployment configuration.

use sheetproxy_cache::CacheReadPolicy;
use sheetproxy_error::{BuilderErrorKind, SheetProxyErrorKind};
use sheetproxy_server::{ProxyConfig, ProxyConfigBuilder};
use std::io::Write;

#[test]
fn test_builder_defaults() -> anyhow::Result<()> {
    let config = ProxyConfigBuilder::default()
        .document_id("doc1")
        .sheet_name("Toggles")
        .build()?;

    assert_eq!(*config.cache_ttl_seconds(), 60);
    assert_eq!(*config.cache_max_entries(), 1000);
    assert_eq!(*config.cache_read_policy(), CacheReadPolicy::Degrade);
    assert_eq!(config.bind_address().port(), 8787);
    assert_eq!(*config.request_timeout_seconds(), 30);
    assert_eq!(config.log_level(), "info");
    assert!(!*config.json_logs());
    Ok(())
}

#[test]
fn test_sheet_url_encodes_spaces() -> anyhow::Result<()> {
    let config = ProxyConfigBuilder::default()
        .document_id("1AbC")
        .sheet_name("Feature Toggles v2")
        .build()?;

    assert_eq!(
        config.sheet_url(),
        "https://docs.google.com/spreadsheets/d/1AbC/gviz/tq?tqx=out:json&sheet=Feature%20Toggles%20v2"
    );
    Ok(())
}

#[test]
fn test_sheet_url_custom_base_trailing_slash() -> anyhow::Result<()> {
    let config = ProxyConfigBuilder::default()
        .document_id("doc1")
        .sheet_name("Sheet1")
        .upstream_base_url("http://127.0.0.1:9000/d/")
        .build()?;

    assert_eq!(
        config.sheet_url(),
        "http://127.0.0.1:9000/d/doc1/gviz/tq?tqx=out:json&sheet=Sheet1"
    );
    Ok(())
}

#[test]
fn test_builder_requires_document_id() {
    let err = ProxyConfigBuilder::default()
        .sheet_name("Toggles")
        .build()
        .unwrap_err();

    assert_eq!(
        err.kind(),
        &BuilderErrorKind::MissingField("document_id".to_string())
    );
}

#[test]
fn test_builder_rejects_blank_document_id() {
    let err = ProxyConfigBuilder::default()
        .document_id("  ")
        .sheet_name("Toggles")
        .build()
        .unwrap_err();

    assert!(matches!(err.kind(), BuilderErrorKind::ValidationFailed(_)));
}

#[test]
fn test_builder_rejects_non_http_base() {
    let err = ProxyConfigBuilder::default()
        .document_id("doc1")
        .sheet_name("Toggles")
        .upstream_base_url("ftp://example.com")
        .build()
        .unwrap_err();

    assert!(matches!(err.kind(), BuilderErrorKind::ValidationFailed(_)));
}

#[test]
fn test_from_file_applies_defaults() -> anyhow::Result<()> {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
    writeln!(
        file,
        r#"
document_id = "doc1"
sheet_name = "Toggles"
cache_ttl_seconds = 120
cache_read_policy = "required"
"#
    )?;

    let config = ProxyConfig::from_file(file.path())?;

    assert_eq!(config.document_id(), "doc1");
    assert_eq!(*config.cache_ttl_seconds(), 120);
    assert_eq!(*config.cache_read_policy(), CacheReadPolicy::Required);
    assert_eq!(config.bind_address().port(), 8787);
    Ok(())
}

#[test]
fn test_from_file_missing_document_id() -> anyhow::Result<()> {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
    writeln!(file, r#"sheet_name = "Toggles""#)?;

    let err = ProxyConfig::from_file(file.path()).unwrap_err();

    assert!(matches!(err.kind(), SheetProxyErrorKind::Config(_)));
    Ok(())
}

#[test]
fn test_from_file_rejects_empty_sheet_name() -> anyhow::Result<()> {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
    writeln!(file, "document_id = \"doc1\"\nsheet_name = \"\"")?;

    let err = ProxyConfig::from_file(file.path()).unwrap_err();

    assert!(matches!(err.kind(), SheetProxyErrorKind::Config(_)));
    Ok(())
}

#[test]
fn test_load_layers_env_over_explicit_over_bundled() -> anyhow::Result<()> {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
    writeln!(
        file,
        r#"
document_id = "doc-from-file"
sheet_name = "File Sheet"
request_timeout_seconds = 5
"#
    )?;

    // Only this test touches SHEETPROXY_* variables.
    unsafe { std::env::set_var("SHEETPROXY_SHEET_NAME", "Env Sheet") };
    let loaded = ProxyConfig::load(Some(file.path()));
    unsafe { std::env::remove_var("SHEETPROXY_SHEET_NAME") };
    let config = loaded?;

    assert_eq!(config.sheet_name(), "Env Sheet");
    assert_eq!(config.document_id(), "doc-from-file");
    assert_eq!(*config.request_timeout_seconds(), 5);
    assert_eq!(*config.cache_ttl_seconds(), 60);
    assert_eq!(*config.cache_read_policy(), CacheReadPolicy::Degrade);
    assert_eq!(config.bind_address().port(), 8787);
    Ok(())
}

#[test]
fn test_load_requires_explicit_file_to_exist() {
    let err = ProxyConfig::load(Some(std::path::Path::new("/nonexistent/sheetproxy.toml")))
        .unwrap_err();

    assert!(matches!(err.kind(), SheetProxyErrorKind::Config(_)));
}
