//! Run results and aggregate reporting.

use serde::{Deserialize, Serialize};

/// Terminal state of one case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseStatus {
    /// The case signaled success and completed cleanly.
    Passed,
    /// An assertion mismatched, or the case completed without signaling
    /// success.
    Failed,
    /// The case panicked, errored outside an assertion, or stalled.
    Errored,
}

/// Immutable outcome of one case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseResult {
    /// Case name.
    pub name: String,
    /// Terminal status.
    pub status: CaseStatus,
    /// Failure or error message, absent for passes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl CaseResult {
    /// A clean pass.
    #[must_use]
    pub fn passed(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CaseStatus::Passed,
            detail: None,
        }
    }

    /// A failed case with its message.
    #[must_use]
    pub fn failed(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CaseStatus::Failed,
            detail: Some(detail.into()),
        }
    }

    /// An errored case with its message.
    #[must_use]
    pub fn errored(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CaseStatus::Errored,
            detail: Some(detail.into()),
        }
    }

    /// Whether this case passed.
    #[must_use]
    pub fn is_passed(&self) -> bool {
        self.status == CaseStatus::Passed
    }
}

/// Aggregate outcome of one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Total cases executed.
    pub total: usize,
    /// Cases that passed.
    pub passed: usize,
    /// Cases that failed an assertion or never signaled success.
    pub failed: usize,
    /// Cases that panicked, errored, or stalled.
    pub errored: usize,
    /// Per-case results, in execution order.
    pub results: Vec<CaseResult>,
}

impl RunReport {
    /// Aggregate a sequence of per-case results.
    #[must_use]
    pub fn from_results(results: Vec<CaseResult>) -> Self {
        let passed = results
            .iter()
            .filter(|r| r.status == CaseStatus::Passed)
            .count();
        let failed = results
            .iter()
            .filter(|r| r.status == CaseStatus::Failed)
            .count();
        let errored = results
            .iter()
            .filter(|r| r.status == CaseStatus::Errored)
            .count();
        Self {
            total: results.len(),
            passed,
            failed,
            errored,
            results,
        }
    }

    /// Whether every case passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.passed == self.total
    }

    /// One-line aggregate, e.g. `7 passed, 1 failed, 0 errored`.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} passed, {} failed, {} errored",
            self.passed, self.failed, self.errored
        )
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Render a markdown report with per-failure messages.
    #[must_use]
    pub fn render_markdown(&self, title: &str) -> String {
        let mut out = String::new();
        out.push_str(&format!("# {title}\n\n"));
        out.push_str(&format!("Summary: {}\n\n", self.summary()));
        out.push_str("| Case | Status | Detail |\n|---|---|---|\n");
        for result in &self.results {
            let status = match result.status {
                CaseStatus::Passed => "pass",
                CaseStatus::Failed => "FAIL",
                CaseStatus::Errored => "ERROR",
            };
            out.push_str(&format!(
                "| {} | {} | {} |\n",
                result.name,
                status,
                result.detail.as_deref().unwrap_or("")
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregation_counts_each_status() {
        let report = RunReport::from_results(vec![
            CaseResult::passed("a"),
            CaseResult::failed("b", "expected 1, got 2"),
            CaseResult::passed("c"),
            CaseResult::errored("d", "stalled"),
        ]);
        assert_eq!(report.total, 4);
        assert_eq!(report.passed, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.errored, 1);
        assert!(!report.all_passed());
        assert_eq!(report.summary(), "2 passed, 1 failed, 1 errored");
    }

    #[test]
    fn markdown_report_carries_failure_detail() {
        let report = RunReport::from_results(vec![CaseResult::failed("b", "expected 1, got 2")]);
        let rendered = report.render_markdown("smoke");
        assert!(rendered.contains("# smoke"));
        assert!(rendered.contains("| b | FAIL | expected 1, got 2 |"));
    }

    #[test]
    fn pass_detail_is_omitted_from_json() {
        let json = serde_json::to_string(&CaseResult::passed("a")).unwrap();
        assert!(!json.contains("detail"));
        assert!(json.contains("\"status\":\"passed\""));
    }
}
