//! Integration-test harness for the inkview document-viewer components.
//!
//! This crate provides:
//! - Assertion primitives: `?`-friendly checks that abort the current case
//! - Case contract: one `TestCase` shape for sync and suspending scenarios
//! - Runner: serial execution with per-case failure isolation and the
//!   poll/drain loop that makes settle-waits deterministic
//! - Reporting: aggregate pass/fail results, markdown and JSON rendering
//! - Structured logging: JSONL run logs with schema validation
//! - Scenario suites: the viewer scenarios the protocol exists for

pub mod case;
pub mod check;
pub mod env;
pub mod report;
pub mod runner;
pub mod structured_log;
pub mod suites;

pub use case::{CaseCx, TestCase};
pub use check::Failure;
pub use env::ViewerEnv;
pub use report::{CaseResult, CaseStatus, RunReport};
pub use runner::{CollectSink, ResultSink, Runner};
