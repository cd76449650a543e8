// lexgate-mcp/src/ingestion/tests.rs
// ============================================================================
// Module: Ingestion Runner Unit Tests
// Description: Unit tests for bounded sub-process execution.
// Purpose: Validate the zeroed-report contract across failure modes.
// Dependencies: lexgate-mcp
// ============================================================================

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    reason = "Test-only assertions favor direct unwrap/expect for clarity."
)]

use std::collections::BTreeMap;

use crate::config::IngestionConfig;

use super::IngestionRunner;

fn runner_with(source: &str, argv: &[&str], timeout_secs: u64) -> IngestionRunner {
    let mut commands = BTreeMap::new();
    commands.insert(source.to_string(), argv.iter().map(|arg| (*arg).to_string()).collect());
    IngestionRunner::from_config(&IngestionConfig {
        commands,
        timeout_secs,
    })
}

#[test]
fn unknown_source_yields_a_zeroed_report() {
    let runner = IngestionRunner::disabled();
    let report = runner.run(Some("dip-bundestag"), false);
    assert_eq!(report.source_id, "dip-bundestag");
    assert_eq!(report.ingested_count, 0);
    assert_eq!(report.skipped_count, 0);
    assert!(!report.dry_run);
}

#[test]
fn missing_source_id_falls_back_to_the_default_source() {
    let runner = IngestionRunner::disabled();
    let report = runner.run(None, true);
    assert_eq!(report.source_id, "gesetze-im-internet");
    assert!(report.dry_run);
}

#[cfg(unix)]
#[test]
fn final_stdout_line_supplies_the_counts() {
    let runner = runner_with(
        "gesetze-im-internet",
        &["sh", "-c", "echo progress; echo '{\"ingested_count\": 42, \"skipped_count\": 7}'"],
        30,
    );
    let report = runner.run(Some("gesetze-im-internet"), false);
    assert_eq!(report.ingested_count, 42);
    assert_eq!(report.skipped_count, 7);
}

#[cfg(unix)]
#[test]
fn non_zero_exit_yields_a_zeroed_report() {
    let runner = runner_with("rechtsprechung-im-internet", &["sh", "-c", "exit 3"], 30);
    let report = runner.run(Some("rechtsprechung-im-internet"), false);
    assert_eq!(report.ingested_count, 0);
    assert_eq!(report.skipped_count, 0);
}

#[cfg(unix)]
#[test]
fn deadline_expiry_yields_a_zeroed_report() {
    let runner = runner_with("dip-bundestag", &["sh", "-c", "sleep 30"], 1);
    let report = runner.run(Some("dip-bundestag"), false);
    assert_eq!(report.ingested_count, 0);
}

#[cfg(unix)]
#[test]
fn unparseable_output_yields_a_zeroed_report() {
    let runner = runner_with("gesetze-im-internet", &["sh", "-c", "echo done"], 30);
    let report = runner.run(Some("gesetze-im-internet"), false);
    assert_eq!(report.ingested_count, 0);
}

#[test]
fn spawn_failure_yields_a_zeroed_report() {
    let runner = runner_with("gesetze-im-internet", &["/nonexistent/ingest"], 5);
    let report = runner.run(Some("gesetze-im-internet"), false);
    assert_eq!(report.ingested_count, 0);
}
