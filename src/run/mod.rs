//! Suite execution module

pub mod config;
pub mod execution;
pub mod request;

// Re-export public types
pub use config::{Harness, Overrides, Settings};
pub use execution::{OutputMode, RunOutcome};
pub use request::{RunRequest, INTERPRETER_FLAG};

use crate::error::Result;
use crate::suite::Suite;

/// Run a single validated request, capturing the harness output
pub fn run_suite(request: &RunRequest) -> Result<RunOutcome> {
    execution::execute_request(request, OutputMode::Capture)
}

/// Runs suites against one configured harness and target
///
/// Every suite is a separate request and a separate child process.
#[derive(Debug, Clone)]
pub struct Runner {
    settings: Settings,
    mode: OutputMode,
    keep_going: bool,
}

impl Runner {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            mode: OutputMode::Capture,
            keep_going: false,
        }
    }

    /// Choose whether harness output is captured or passed straight through
    pub fn output_mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    /// Keep running the remaining suites after one fails
    pub fn keep_going(mut self, keep_going: bool) -> Self {
        self.keep_going = keep_going;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Validate the request for `suite` without spawning anything
    pub fn prepare(&self, suite: &Suite) -> Result<RunRequest> {
        RunRequest::new(suite.clone(), &self.settings)
    }

    /// Run one suite
    pub fn run(&self, suite: &Suite) -> Result<RunOutcome> {
        let request = self.prepare(suite)?;
        execution::execute_request(&request, self.mode)
    }

    /// Run suites in order, handing each outcome to `report` as it completes
    ///
    /// Stops after the first failing suite unless `keep_going` is set.
    /// Configuration and invocation errors end the sequence immediately.
    pub fn run_all<F>(&self, suites: &[Suite], mut report: F) -> Result<Vec<RunOutcome>>
    where
        F: FnMut(&RunOutcome) -> Result<()>,
    {
        let mut outcomes = Vec::with_capacity(suites.len());

        for suite in suites {
            let outcome = self.run(suite)?;
            report(&outcome)?;

            if outcome.success() {
                tracing::info!(suite = %suite, "PASS");
            } else {
                tracing::info!(suite = %suite, status = outcome.status, "FAIL");
            }

            let failed = !outcome.success();
            outcomes.push(outcome);

            if failed && !self.keep_going {
                let remaining = suites.len() - outcomes.len();
                if remaining > 0 {
                    tracing::warn!(remaining, "stopping after failure");
                }
                break;
            }
        }

        Ok(outcomes)
    }
}

/// Status of the first failing outcome, or 0 when all passed
pub fn overall_status(outcomes: &[RunOutcome]) -> i32 {
    outcomes
        .iter()
        .find(|outcome| !outcome.success())
        .map(|outcome| outcome.status)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(name: &str, status: i32) -> RunOutcome {
        RunOutcome {
            suite: Suite::parse(name).unwrap(),
            status,
            stdout: Vec::new(),
            stderr: Vec::new(),
        }
    }

    #[test]
    fn overall_status_is_first_failure() {
        let outcomes = vec![
            outcome("chap09_control", 0),
            outcome("chap10_functions", 65),
            outcome("chap11_resolving", 1),
        ];
        assert_eq!(overall_status(&outcomes), 65);
    }

    #[test]
    fn overall_status_of_passing_runs_is_zero() {
        assert_eq!(overall_status(&[outcome("jlox", 0)]), 0);
        assert_eq!(overall_status(&[]), 0);
    }
}
