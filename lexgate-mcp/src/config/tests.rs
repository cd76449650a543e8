// lexgate-mcp/src/config/tests.rs
// ============================================================================
// Module: Server Configuration Unit Tests
// Description: Unit tests for defaults and cross-field validation.
// Purpose: Validate that empty configs work and bad configs fail closed.
// Dependencies: lexgate-mcp
// ============================================================================

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    reason = "Test-only assertions favor direct unwrap/expect for clarity."
)]

use std::path::PathBuf;

use super::AuditMode;
use super::ServerConfig;

#[test]
fn empty_config_has_working_defaults() {
    let config: ServerConfig = toml::from_str("").expect("parse empty");
    config.validate().expect("defaults validate");
    assert_eq!(config.database.path, PathBuf::from("data/corpus.db"));
    assert_eq!(config.audit.mode, AuditMode::Stderr);
    assert_eq!(config.transport.max_line_bytes, 1024 * 1024);
    assert_eq!(config.ingestion.timeout_secs, 300);
    assert!(config.ingestion.commands.is_empty());
}

#[test]
fn full_config_round_trips() {
    let raw = r#"
        [database]
        path = "corpus/de.db"

        [audit]
        mode = "file"
        path = "logs/audit.jsonl"

        [transport]
        max_line_bytes = 65536

        [ingestion]
        timeout_secs = 60

        [ingestion.commands]
        gesetze-im-internet = ["python3", "scripts/ingest_gesetze_im_internet.py"]
    "#;
    let config: ServerConfig = toml::from_str(raw).expect("parse");
    config.validate().expect("validate");
    assert_eq!(config.database.path, PathBuf::from("corpus/de.db"));
    assert_eq!(config.ingestion.commands.len(), 1);
}

#[test]
fn file_audit_mode_requires_a_path() {
    let raw = "[audit]\nmode = \"file\"\n";
    let config: ServerConfig = toml::from_str(raw).expect("parse");
    let err = config.validate().expect_err("expected invalid");
    assert!(err.to_string().contains("audit.path"));
}

#[test]
fn zero_ingestion_timeout_is_rejected() {
    let raw = "[ingestion]\ntimeout_secs = 0\n";
    let config: ServerConfig = toml::from_str(raw).expect("parse");
    assert!(config.validate().is_err());
}

#[test]
fn empty_ingestion_command_is_rejected() {
    let raw = "[ingestion.commands]\ndip-bundestag = []\n";
    let config: ServerConfig = toml::from_str(raw).expect("parse");
    assert!(config.validate().is_err());
}

#[test]
fn unknown_fields_are_rejected() {
    let raw = "[database]\npath = \"x.db\"\nhost = \"nope\"\n";
    assert!(toml::from_str::<ServerConfig>(raw).is_err());
}
