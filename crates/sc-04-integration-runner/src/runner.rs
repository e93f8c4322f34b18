//! Sequential phase execution.
//!
//! Each phase runs only after the previous one has returned. A phase that
//! returns an error is reported as aborted and every later phase as skipped;
//! failed checks inside a phase never stop the series.

use std::fmt::{Debug, Display};
use std::time::Instant;

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::context::SuiteContext;
use crate::errors::PhaseError;
use crate::report::{CheckResult, PhaseReport, SuiteReport};

/// Check results collected while a phase runs.
#[derive(Debug, Default)]
pub struct Checks {
    results: Vec<CheckResult>,
}

impl Checks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an equality check.
    pub fn expect_eq<T>(&mut self, name: &str, expected: T, actual: T)
    where
        T: PartialEq + Debug,
    {
        if expected == actual {
            self.pass(name);
        } else {
            self.fail(name, format!("{:?}", expected), format!("{:?}", actual));
        }
    }

    /// Record an equality check against a read that may itself have failed.
    pub fn expect_read<T, E>(&mut self, name: &str, expected: T, actual: Result<T, E>)
    where
        T: PartialEq + Debug,
        E: Display,
    {
        match actual {
            Ok(actual) => self.expect_eq(name, expected, actual),
            Err(e) => self.fail(name, format!("{:?}", expected), format!("error: {}", e)),
        }
    }

    /// Record that a value exists and is non-empty.
    pub fn expect_defined(&mut self, name: &str, defined: bool) {
        if defined {
            self.pass(name);
        } else {
            self.fail(name, "defined".to_string(), "undefined".to_string());
        }
    }

    pub fn pass(&mut self, name: &str) {
        info!(check = name, "check passed");
        self.results.push(CheckResult::passed(name));
    }

    pub fn fail(&mut self, name: &str, expected: String, actual: String) {
        warn!(check = name, %expected, %actual, "check failed");
        self.results.push(CheckResult::failed(name, expected, actual));
    }

    pub fn results(&self) -> &[CheckResult] {
        &self.results
    }

    pub fn into_results(self) -> Vec<CheckResult> {
        self.results
    }
}

/// One step of the suite.
#[async_trait]
pub trait Phase: Send + Sync {
    fn name(&self) -> &str;

    /// Perform the phase's work and its read-back checks.
    ///
    /// Returning `Err` means the work itself never completed.
    async fn run(&self, ctx: &mut SuiteContext, checks: &mut Checks) -> Result<(), PhaseError>;
}

/// Runs phases strictly one after another.
#[derive(Default)]
pub struct SequentialRunner {
    phases: Vec<Box<dyn Phase>>,
    closing_note: Option<String>,
}

impl SequentialRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Message logged after the last phase, whatever the outcome.
    pub fn with_closing_note(mut self, note: impl Into<String>) -> Self {
        self.closing_note = Some(note.into());
        self
    }

    pub fn phase_names(&self) -> Vec<&str> {
        self.phases.iter().map(|p| p.name()).collect()
    }

    pub async fn run(&self, ctx: &mut SuiteContext) -> SuiteReport {
        let mut report = SuiteReport::new();
        info!(run_id = %report.run_id, phases = self.phases.len(), "suite started");

        let mut halted = false;
        for phase in &self.phases {
            let name = phase.name();
            if halted {
                info!(phase = name, "phase skipped");
                report.phases.push(PhaseReport::skipped(name));
                continue;
            }

            info!(phase = name, "phase started");
            let started = Instant::now();
            let mut checks = Checks::new();
            let outcome = phase.run(ctx, &mut checks).await;
            let elapsed = started.elapsed();

            let phase_report = match outcome {
                Ok(()) => PhaseReport::completed(name, checks.into_results(), elapsed),
                Err(e) => {
                    error!(phase = name, error = %e, "phase aborted");
                    halted = true;
                    PhaseReport::aborted(name, checks.into_results(), e.to_string(), elapsed)
                }
            };
            info!(
                phase = name,
                status = phase_report.status.as_str(),
                elapsed_ms = phase_report.elapsed_ms,
                "phase finished"
            );
            report.phases.push(phase_report);
        }

        if let Some(note) = &self.closing_note {
            info!("{}", note);
        }
        report
    }
}
