// lexgate-mcp/src/ingestion.rs
// ============================================================================
// Module: Ingestion Runner
// Description: Bounded external ingestion sub-process execution.
// Purpose: Surface ingestion outcomes as reports, never as failures.
// Dependencies: lexgate-core, serde_json, time
// ============================================================================

//! ## Overview
//! Ingestion is the only operation permitted to shell out. The runner
//! spawns the configured command for a source with a bounded deadline and
//! reads the child's final stdout line as a JSON count report. Any
//! failure yields a zeroed report: unknown source, spawn error, non-zero
//! exit, deadline expiry, or unparseable output. The caller always
//! receives `ok:true`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::io::Read;
use std::process::Command;
use std::process::Stdio;
use std::thread;
use std::time::Duration;
use std::time::Instant;

use lexgate_core::IngestionReport;
use serde_json::Value;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::config::IngestionConfig;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Poll interval while waiting for the child.
const WAIT_POLL: Duration = Duration::from_millis(50);
/// Source ingested when the caller names none.
const DEFAULT_SOURCE: &str = "gesetze-im-internet";

// ============================================================================
// SECTION: Runner
// ============================================================================

/// Bounded runner for external ingestion commands.
pub struct IngestionRunner {
    /// Command argv per source id.
    commands: BTreeMap<String, Vec<String>>,
    /// Sub-process deadline.
    timeout: Duration,
}

impl IngestionRunner {
    /// Creates a runner from the ingestion config section.
    #[must_use]
    pub fn from_config(config: &IngestionConfig) -> Self {
        Self {
            commands: config.commands.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Creates a runner with no commands; every run reports zero counts.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            commands: BTreeMap::new(),
            timeout: Duration::from_secs(1),
        }
    }

    /// Runs ingestion for a source, bounded by the configured deadline.
    #[must_use]
    pub fn run(&self, source_id: Option<&str>, dry_run: bool) -> IngestionReport {
        let started_at = timestamp();
        let source = source_id.unwrap_or(DEFAULT_SOURCE).to_string();
        let counts = self.execute(&source, dry_run).unwrap_or((0, 0));
        IngestionReport {
            started_at,
            finished_at: timestamp(),
            source_id: source,
            dry_run,
            ingested_count: counts.0,
            skipped_count: counts.1,
        }
    }

    /// Executes the configured command; `None` means a zeroed report.
    fn execute(&self, source: &str, dry_run: bool) -> Option<(u64, u64)> {
        let argv = self.commands.get(source)?;
        let (program, args) = argv.split_first()?;
        let mut command = Command::new(program);
        command.args(args);
        if dry_run {
            command.arg("--dry-run");
        }
        command.stdin(Stdio::null()).stdout(Stdio::piped()).stderr(Stdio::null());
        let mut child = command.spawn().ok()?;

        // Drain stdout on a separate thread so a chatty child cannot
        // block on a full pipe while we poll for exit.
        let stdout = child.stdout.take()?;
        let reader = thread::spawn(move || {
            let mut buffer = String::new();
            let mut stdout = stdout;
            let _ = stdout.read_to_string(&mut buffer);
            buffer
        });

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {
                    if Instant::now() >= deadline {
                        let _ = child.kill();
                        let _ = child.wait();
                        let _ = reader.join();
                        return None;
                    }
                    thread::sleep(WAIT_POLL);
                }
                Err(_) => {
                    let _ = child.kill();
                    let _ = reader.join();
                    return None;
                }
            }
        };

        let output = reader.join().ok()?;
        if !status.success() {
            return None;
        }
        parse_counts(&output)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses the final stdout line as a JSON count report.
fn parse_counts(output: &str) -> Option<(u64, u64)> {
    let line = output.lines().rev().find(|line| !line.trim().is_empty())?;
    let report: Value = serde_json::from_str(line.trim()).ok()?;
    let ingested = count_field(&report, &["ingested_count", "ingestedCount", "ingested"])?;
    let skipped =
        count_field(&report, &["skipped_count", "skippedCount", "skipped"]).unwrap_or(0);
    Some((ingested, skipped))
}

/// Reads the first matching numeric field.
fn count_field(report: &Value, names: &[&str]) -> Option<u64> {
    names.iter().find_map(|name| report.get(name).and_then(Value::as_u64))
}

/// RFC 3339 timestamp for report fields.
fn timestamp() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| String::from("1970-01-01T00:00:00Z"))
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
