//! Outcome of a suite run.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Result of a single read-back check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CheckOutcome {
    Passed,
    Failed { expected: String, actual: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub name: String,
    #[serde(flatten)]
    pub outcome: CheckOutcome,
}

impl CheckResult {
    pub fn passed(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outcome: CheckOutcome::Passed,
        }
    }

    pub fn failed(name: impl Into<String>, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outcome: CheckOutcome::Failed {
                expected: expected.into(),
                actual: actual.into(),
            },
        }
    }

    pub fn is_passed(&self) -> bool {
        matches!(self.outcome, CheckOutcome::Passed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseStatus {
    /// Work confirmed and every check held.
    Passed,
    /// Work confirmed but at least one check did not hold.
    Failed,
    /// Work never confirmed; the series stopped here.
    Aborted,
    /// Not run because an earlier phase aborted.
    Skipped,
}

impl PhaseStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PhaseStatus::Passed => "PASS",
            PhaseStatus::Failed => "FAIL",
            PhaseStatus::Aborted => "ABORT",
            PhaseStatus::Skipped => "SKIP",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseReport {
    pub name: String,
    pub status: PhaseStatus,
    pub checks: Vec<CheckResult>,
    /// Why the phase aborted
    pub error: Option<String>,
    pub elapsed_ms: u64,
}

impl PhaseReport {
    /// Report for a phase whose work completed.
    pub fn completed(name: impl Into<String>, checks: Vec<CheckResult>, elapsed: Duration) -> Self {
        let status = if checks.iter().all(CheckResult::is_passed) {
            PhaseStatus::Passed
        } else {
            PhaseStatus::Failed
        };
        Self {
            name: name.into(),
            status,
            checks,
            error: None,
            elapsed_ms: duration_ms(elapsed),
        }
    }

    /// Report for a phase that stopped the series.
    pub fn aborted(
        name: impl Into<String>,
        checks: Vec<CheckResult>,
        error: impl Into<String>,
        elapsed: Duration,
    ) -> Self {
        Self {
            name: name.into(),
            status: PhaseStatus::Aborted,
            checks,
            error: Some(error.into()),
            elapsed_ms: duration_ms(elapsed),
        }
    }

    pub fn skipped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: PhaseStatus::Skipped,
            checks: Vec::new(),
            error: None,
            elapsed_ms: 0,
        }
    }
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// Counts across a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SuiteSummary {
    pub passed: usize,
    pub failed: usize,
    pub aborted: usize,
    pub skipped: usize,
    pub checks_passed: usize,
    pub checks_failed: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub phases: Vec<PhaseReport>,
}

impl SuiteReport {
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            phases: Vec::new(),
        }
    }

    pub fn phase(&self, name: &str) -> Option<&PhaseReport> {
        self.phases.iter().find(|p| p.name == name)
    }

    pub fn summary(&self) -> SuiteSummary {
        let mut s = SuiteSummary::default();
        for phase in &self.phases {
            match phase.status {
                PhaseStatus::Passed => s.passed += 1,
                PhaseStatus::Failed => s.failed += 1,
                PhaseStatus::Aborted => s.aborted += 1,
                PhaseStatus::Skipped => s.skipped += 1,
            }
            for check in &phase.checks {
                if check.is_passed() {
                    s.checks_passed += 1;
                } else {
                    s.checks_failed += 1;
                }
            }
        }
        s
    }

    /// True when every phase passed.
    pub fn is_success(&self) -> bool {
        !self.phases.is_empty() && self.phases.iter().all(|p| p.status == PhaseStatus::Passed)
    }
}

impl Default for SuiteReport {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SuiteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "run {}", self.run_id)?;
        for phase in &self.phases {
            writeln!(f, "[{}] {} ({} ms)", phase.status.as_str(), phase.name, phase.elapsed_ms)?;
            for check in &phase.checks {
                match &check.outcome {
                    CheckOutcome::Passed => writeln!(f, "    ok   {}", check.name)?,
                    CheckOutcome::Failed { expected, actual } => writeln!(
                        f,
                        "    FAIL {}: expected {:?}, got {:?}",
                        check.name, expected, actual
                    )?,
                }
            }
            if let Some(error) = &phase.error {
                writeln!(f, "    error: {}", error)?;
            }
        }

        let s = self.summary();
        write!(
            f,
            "{} passed, {} failed, {} aborted, {} skipped ({} checks passed, {} failed)",
            s.passed, s.failed, s.aborted, s.skipped, s.checks_passed, s.checks_failed
        )
    }
}
