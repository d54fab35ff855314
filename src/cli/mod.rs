//! Subcommand pipelines and the vocabulary they share.
//!
//! Each subcommand is an ordered sequence of steps. A step either passes,
//! produces a [`Warning`] the run carries forward, or aborts with a
//! [`FatalError`]. Warnings print as they occur and are tallied in the
//! closing summary; fatal errors stop the run and map to exit code 1.

pub mod install;
pub mod status;
pub mod uninstall;

use std::path::PathBuf;

use crate::console;
use crate::hooks::HookError;
use crate::path::PathError;

/// Errors that terminate a run.
#[derive(Debug, thiserror::Error)]
pub enum FatalError {
    /// A required host program is not installed.
    #[error("required dependency not found: {name}")]
    MissingDependency { name: &'static str },
    /// The release artifact has not been built.
    #[error("build artifact not found: {path}")]
    MissingArtifact { path: PathBuf },
    /// The binary did not end up present and executable at its destination.
    #[error("installed binary failed verification: {path}")]
    InstallVerificationFailed {
        path: PathBuf,
        #[source]
        source: Option<std::io::Error>,
    },
    #[error(transparent)]
    Json(#[from] HookError),
    #[error(transparent)]
    Path(#[from] PathError),
}

impl FatalError {
    /// Actionable follow-up printed under the diagnostic, when one exists.
    fn guidance(&self) -> Option<String> {
        match self {
            FatalError::MissingDependency { name: "claude" } => {
                Some("install Claude Code first: npm install -g @anthropic-ai/claude-code".to_string())
            }
            FatalError::MissingDependency { .. } => None,
            FatalError::MissingArtifact { .. } => {
                Some("run `cargo build --release` and try again".to_string())
            }
            FatalError::Json(_) => {
                Some("the settings file was left as it was; see the .backup copy next to it".to_string())
            }
            _ => None,
        }
    }
}

/// A non-fatal finding; the run continues and the summary counts it.
#[derive(Debug)]
pub struct Warning {
    pub message: String,
    pub guidance: Option<String>,
}

impl Warning {
    pub fn new(message: impl Into<String>) -> Self {
        Warning {
            message: message.into(),
            guidance: None,
        }
    }

    pub fn with_guidance(message: impl Into<String>, guidance: impl Into<String>) -> Self {
        Warning {
            message: message.into(),
            guidance: Some(guidance.into()),
        }
    }
}

/// Result of a pipeline step that did not abort the run.
#[derive(Debug)]
pub enum StepOutcome {
    Passed,
    Warned(Warning),
}

/// Warnings accumulated across a run, in step order.
#[derive(Debug, Default)]
pub struct RunReport {
    warnings: Vec<Warning>,
}

impl RunReport {
    /// Records a step outcome, printing any warning as it happens.
    pub fn record(&mut self, outcome: StepOutcome) {
        if let StepOutcome::Warned(warning) = outcome {
            console::warn(&warning.message);
            if let Some(guidance) = &warning.guidance {
                console::guidance(guidance);
            }
            self.warnings.push(warning);
        }
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }
}

/// Prints a fatal error with its cause chain and guidance.
pub(crate) fn report_fatal(err: &FatalError) {
    console::error(&err.to_string());
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        console::guidance(&format!("caused by: {cause}"));
        source = cause.source();
    }
    if let Some(hint) = err.guidance() {
        console::guidance(&hint);
    }
}
