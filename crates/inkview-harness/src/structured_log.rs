//! Structured JSONL logging for harness runs.
//!
//! Provides:
//! - [`LogEntry`]: canonical JSONL record with required + optional fields.
//! - [`LogEmitter`]: writes JSONL lines to a file or stdout.
//! - [`validate_log_line`] / [`validate_log_file`]: schema checks for
//!   consumers that aggregate run logs.

use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::report::{CaseResult, CaseStatus};

/// Severity level for log entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Case outcome as logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutcome {
    Pass,
    Fail,
    Error,
}

impl From<CaseStatus> for LogOutcome {
    fn from(status: CaseStatus) -> Self {
        match status {
            CaseStatus::Passed => Self::Pass,
            CaseStatus::Failed => Self::Fail,
            CaseStatus::Errored => Self::Error,
        }
    }
}

/// Canonical structured log entry.
///
/// Required fields: `timestamp`, `run_id`, `level`, `event`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    // Required
    pub timestamp: String,
    pub run_id: String,
    pub level: LogLevel,
    pub event: String,

    // Optional
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suite: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<LogOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl LogEntry {
    /// Create a new log entry with required fields only.
    #[must_use]
    pub fn new(run_id: impl Into<String>, level: LogLevel, event: impl Into<String>) -> Self {
        Self {
            timestamp: now_utc(),
            run_id: run_id.into(),
            level,
            event: event.into(),
            suite: None,
            case: None,
            outcome: None,
            duration_ms: None,
            details: None,
        }
    }

    /// Entry describing one finished case.
    #[must_use]
    pub fn for_case(run_id: impl Into<String>, suite: &str, result: &CaseResult) -> Self {
        let level = match result.status {
            CaseStatus::Passed => LogLevel::Info,
            CaseStatus::Failed | CaseStatus::Errored => LogLevel::Error,
        };
        let mut entry = Self::new(run_id, level, "case_finished")
            .with_suite(suite)
            .with_case(&result.name)
            .with_outcome(result.status.into());
        if let Some(detail) = &result.detail {
            entry = entry.with_details(serde_json::json!({ "detail": detail }));
        }
        entry
    }

    /// Set the suite name.
    #[must_use]
    pub fn with_suite(mut self, suite: impl Into<String>) -> Self {
        self.suite = Some(suite.into());
        self
    }

    /// Set the case name.
    #[must_use]
    pub fn with_case(mut self, case: impl Into<String>) -> Self {
        self.case = Some(case.into());
        self
    }

    /// Set the outcome.
    #[must_use]
    pub fn with_outcome(mut self, outcome: LogOutcome) -> Self {
        self.outcome = Some(outcome);
        self
    }

    /// Set the duration in milliseconds.
    #[must_use]
    pub fn with_duration_ms(mut self, ms: u64) -> Self {
        self.duration_ms = Some(ms);
        self
    }

    /// Set free-form details.
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Serialize to a single JSONL line (no trailing newline).
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Errors from emitting or validating logs.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("line {line}: {reason}")]
    Schema { line: usize, reason: String },
}

/// Writes structured JSONL log entries to a file or stdout.
pub struct LogEmitter {
    writer: Box<dyn Write>,
    lines: u64,
}

impl LogEmitter {
    /// Emit to a file, truncating any previous contents.
    pub fn to_file(path: &Path) -> Result<Self, LogError> {
        let file = std::fs::File::create(path)?;
        Ok(Self {
            writer: Box::new(file),
            lines: 0,
        })
    }

    /// Emit to stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self {
            writer: Box::new(std::io::stdout()),
            lines: 0,
        }
    }

    /// Write one entry as a JSONL line.
    pub fn emit(&mut self, entry: &LogEntry) -> Result<(), LogError> {
        let line = entry.to_jsonl()?;
        writeln!(self.writer, "{line}")?;
        self.lines += 1;
        Ok(())
    }

    /// Lines written so far.
    #[must_use]
    pub fn lines_written(&self) -> u64 {
        self.lines
    }
}

/// Validate a single JSONL line against the log schema.
pub fn validate_log_line(line: &str) -> Result<LogEntry, LogError> {
    let entry: LogEntry = serde_json::from_str(line)?;
    for (field, value) in [
        ("timestamp", &entry.timestamp),
        ("run_id", &entry.run_id),
        ("event", &entry.event),
    ] {
        if value.is_empty() {
            return Err(LogError::Schema {
                line: 0,
                reason: format!("required field `{field}` is empty"),
            });
        }
    }
    Ok(entry)
}

/// Validate an entire JSONL file; returns the number of valid entries.
pub fn validate_log_file(path: &Path) -> Result<usize, LogError> {
    let content = std::fs::read_to_string(path)?;
    let mut count = 0;
    for (index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        validate_log_line(line).map_err(|err| match err {
            LogError::Schema { reason, .. } => LogError::Schema {
                line: index + 1,
                reason,
            },
            other => other,
        })?;
        count += 1;
    }
    Ok(count)
}

fn now_utc() -> String {
    // Simple format without an external chrono dependency.
    let duration = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    let secs = duration.as_secs();
    let millis = duration.subsec_millis();
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
        1970 + secs / 31_557_600,
        (secs % 31_557_600) / 2_629_800 + 1,
        (secs % 2_629_800) / 86400 + 1,
        (secs % 86400) / 3600,
        (secs % 3600) / 60,
        secs % 60,
        millis,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_serializes_required_fields() {
        let entry = LogEntry::new("run-1", LogLevel::Info, "run_start");
        let json = entry.to_jsonl().unwrap();
        let parsed: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["run_id"], "run-1");
        assert_eq!(parsed["level"], "info");
        assert_eq!(parsed["event"], "run_start");
        assert!(parsed["timestamp"].is_string());
        // Optional fields are omitted, not nulled.
        assert!(parsed.get("case").is_none());
    }

    #[test]
    fn case_entry_maps_status_to_level_and_outcome() {
        let result = CaseResult::failed("progress_display", "expected \"30%\", got \"0%\"");
        let entry = LogEntry::for_case("run-1", "progress", &result);
        assert_eq!(entry.level, LogLevel::Error);
        assert_eq!(entry.outcome, Some(LogOutcome::Fail));
        assert_eq!(entry.case.as_deref(), Some("progress_display"));
        assert!(entry.details.is_some());
    }

    #[test]
    fn valid_line_round_trips() {
        let entry = LogEntry::new("run-1", LogLevel::Debug, "drain")
            .with_suite("toolbar")
            .with_duration_ms(3);
        let line = entry.to_jsonl().unwrap();
        let validated = validate_log_line(&line).unwrap();
        assert_eq!(validated.suite.as_deref(), Some("toolbar"));
    }

    #[test]
    fn empty_required_field_is_a_schema_error() {
        let line = r#"{"timestamp":"2026-08-30T00:00:00.000Z","run_id":"","level":"info","event":"x"}"#;
        let err = validate_log_line(line).unwrap_err();
        assert!(matches!(err, LogError::Schema { .. }));
    }

    #[test]
    fn unknown_level_fails_to_parse() {
        let line = r#"{"timestamp":"t","run_id":"r","level":"shout","event":"x"}"#;
        assert!(matches!(
            validate_log_line(line),
            Err(LogError::Json(_))
        ));
    }
}
