
use itertools::Itertools;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::data_types::value_enums::Action;
use crate::solver::SolverCommand;

/// Final state of a single user action
#[derive(Clone, Copy, Debug, strum_macros::Display, Eq, PartialEq)]
pub enum DispatchStatus {
    Success,
    /// The selections were rejected before the solver was called
    ValidationFailed,
    /// The solver signaled a failure
    BackendFailed
}

/// Everything the user gets to see after an action; single use
#[derive(Clone, Debug)]
pub struct DispatchOutcome {
    status: DispatchStatus,
    action: Action,
    /// The solver command, if resolution got that far
    command: Option<SolverCommand>,
    output_path: Option<PathBuf>,
    /// Everything the solver emitted, verbatim and in order
    captured_text: String,
    /// Time spent inside the solver call, only on success
    elapsed: Option<Duration>,
    /// Failure message, only on failure
    error_detail: Option<String>
}

impl DispatchOutcome {
    /// Successful solver call
    pub fn success(
        action: Action, command: SolverCommand, output_path: Option<PathBuf>,
        captured_text: String, elapsed: Duration
    ) -> Self {
        Self {
            status: DispatchStatus::Success,
            action,
            command: Some(command),
            output_path,
            captured_text,
            elapsed: Some(elapsed),
            error_detail: None
        }
    }

    /// The selections never made it to the solver
    pub fn validation_failed(action: Action, error_detail: String) -> Self {
        Self {
            status: DispatchStatus::ValidationFailed,
            action,
            command: None,
            output_path: None,
            captured_text: String::new(),
            elapsed: None,
            error_detail: Some(error_detail)
        }
    }

    /// The solver failed; anything it emitted before failing is kept
    pub fn backend_failed(
        action: Action, command: SolverCommand, output_path: Option<PathBuf>,
        captured_text: String, error_detail: String
    ) -> Self {
        Self {
            status: DispatchStatus::BackendFailed,
            action,
            command: Some(command),
            output_path,
            captured_text,
            elapsed: None,
            error_detail: Some(error_detail)
        }
    }

    // getters
    pub fn status(&self) -> DispatchStatus {
        self.status
    }

    pub fn is_success(&self) -> bool {
        self.status == DispatchStatus::Success
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn command(&self) -> Option<SolverCommand> {
        self.command
    }

    pub fn output_path(&self) -> Option<&Path> {
        self.output_path.as_deref()
    }

    pub fn captured_text(&self) -> &str {
        &self.captured_text
    }

    pub fn elapsed(&self) -> Option<Duration> {
        self.elapsed
    }

    pub fn error_detail(&self) -> Option<&str> {
        self.error_detail.as_deref()
    }

    /// Renders the user-facing report for this outcome.
    /// The solver's own text is echoed as-is rather than re-derived.
    pub fn report(&self) -> String {
        match self.status {
            DispatchStatus::Success => {
                match (self.action, self.command) {
                    (Action::Inspect, _) => format!("Metadata Output:\n{}", self.captured_text),
                    (Action::Run, command) => {
                        let label = command.map(|c| c.program_name()).unwrap_or("Command");
                        let location = self.output_path.as_deref()
                            .map(|p| p.display().to_string())
                            .unwrap_or_default();
                        let seconds = self.elapsed.unwrap_or_default().as_secs_f64();
                        let mut report = format!(
                            "{label} executed successfully\nOutput file location: {location}\nRun time: {seconds:.4} seconds"
                        );
                        if !self.captured_text.is_empty() {
                            report.push_str("\n\n");
                            report.push_str(&self.captured_text);
                        }
                        report
                    }
                }
            },
            DispatchStatus::ValidationFailed => {
                let detail = self.error_detail.as_deref().unwrap_or_default();
                let lines = detail.lines().map(|l| format!("  - {l}")).join("\n");
                format!("Please correct the following:\n{lines}")
            },
            DispatchStatus::BackendFailed => {
                let detail = self.error_detail.as_deref().unwrap_or_default();
                if self.captured_text.is_empty() {
                    format!("Error: {detail}")
                } else {
                    format!("Error: {detail}\n\nSolver output:\n{}", self.captured_text)
                }
            }
        }
    }
}
