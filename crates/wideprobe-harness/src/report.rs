//! Probe verification report rendering.

use serde::Serialize;

use crate::runner::{ProbeRun, VerificationResult};

/// Aggregate pass/fail counts across all checks.
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

impl ReportSummary {
    /// Tally a flat list of verification results.
    #[must_use]
    pub fn from_results(results: &[VerificationResult]) -> Self {
        let passed = results.iter().filter(|r| r.passed).count();
        Self {
            total: results.len(),
            passed,
            failed: results.len() - passed,
        }
    }

    /// True when every check passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// One probe's section of the report.
#[derive(Debug, Clone, Serialize)]
pub struct RunSection {
    /// Probe id string.
    pub probe: String,
    /// Terminal outcome label (`exit:0`, `signal:11`).
    pub outcome: String,
    /// SHA-256 of the captured stdout bytes.
    pub stdout_sha256: String,
    /// Verified properties for this run.
    pub checks: Vec<VerificationResult>,
}

impl RunSection {
    /// Build a section from a run and its verification results.
    #[must_use]
    pub fn new(run: &ProbeRun, checks: Vec<VerificationResult>) -> Self {
        Self {
            probe: run.probe.as_str().to_string(),
            outcome: run.outcome.label(),
            stdout_sha256: run.stdout_sha256.clone(),
            checks,
        }
    }
}

/// Full verification report over all probes.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeReport {
    pub title: String,
    /// Caller-supplied timestamp so report generation can be deterministic.
    pub timestamp: String,
    pub summary: ReportSummary,
    pub sections: Vec<RunSection>,
}

impl ProbeReport {
    /// Assemble a report from per-probe sections.
    #[must_use]
    pub fn new(title: impl Into<String>, timestamp: impl Into<String>, sections: Vec<RunSection>) -> Self {
        let all: Vec<VerificationResult> = sections.iter().flat_map(|s| s.checks.clone()).collect();
        Self {
            title: title.into(),
            timestamp: timestamp.into(),
            summary: ReportSummary::from_results(&all),
            sections,
        }
    }

    /// Render as markdown.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("# {}\n\n", self.title));
        out.push_str(&format!("Generated: {}\n\n", self.timestamp));
        out.push_str(&format!(
            "Summary: {} checks, {} passed, {} failed\n\n",
            self.summary.total, self.summary.passed, self.summary.failed
        ));
        for section in &self.sections {
            out.push_str(&format!(
                "## {} ({})\n\nstdout sha256: `{}`\n\n",
                section.probe, section.outcome, section.stdout_sha256
            ));
            for check in &section.checks {
                let mark = if check.passed { "PASS" } else { "FAIL" };
                out.push_str(&format!("- [{mark}] {}: {}\n", check.check, check.detail));
            }
            out.push('\n');
        }
        out
    }

    /// Render as pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
