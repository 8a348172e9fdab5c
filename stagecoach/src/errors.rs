//! Error types for the stagecoach runner.

use thiserror::Error;

/// The main error type for stagecoach operations.
///
/// Stage and post-action failures are not errors at this level; they are
/// reported through [`crate::core::RunReport`]. This type covers the
/// declaration and infrastructure failures that prevent a run entirely.
#[derive(Debug, Error)]
pub enum StagecoachError {
    /// A pipeline validation error occurred.
    #[error("{0}")]
    Validation(#[from] PipelineValidationError),

    /// A step failed during stage execution.
    #[error("{0}")]
    Step(#[from] StepError),

    /// Delivering a notification failed.
    #[error("{0}")]
    Notify(#[from] NotifyError),

    /// Cleaning a workspace failed.
    #[error("{0}")]
    Cleanup(#[from] CleanupError),

    /// IO error (workspace allocation and similar).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error raised when a pipeline declaration fails validation.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct PipelineValidationError {
    /// The error message.
    pub message: String,
    /// The stages involved in the error.
    pub stages: Vec<String>,
}

impl PipelineValidationError {
    /// Creates a new pipeline validation error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stages: Vec::new(),
        }
    }

    /// Sets the stages involved.
    #[must_use]
    pub fn with_stages(mut self, stages: Vec<String>) -> Self {
        self.stages = stages;
        self
    }
}

/// Error raised by a failing step.
#[derive(Debug, Clone, Error)]
#[error("step '{step}' failed: {message}")]
pub struct StepError {
    /// The name of the step that failed.
    pub step: String,
    /// What went wrong.
    pub message: String,
}

impl StepError {
    /// Creates a new step error.
    #[must_use]
    pub fn new(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            step: step.into(),
            message: message.into(),
        }
    }
}

/// Error raised when a notification cannot be delivered.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The notifier configuration is unusable.
    #[error("invalid notifier configuration: {0}")]
    InvalidConfig(String),

    /// The HTTP request could not be built or sent.
    #[error("notification request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The receiving service answered with a non-success status.
    #[error("notification rejected with status {status}")]
    UnexpectedStatus {
        /// The HTTP status code returned.
        status: u16,
    },
}

/// Error raised when workspace cleanup fails.
#[derive(Debug, Error)]
pub enum CleanupError {
    /// Filesystem removal failed.
    #[error("workspace removal failed: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = PipelineValidationError::new("duplicate stage 'Build'")
            .with_stages(vec!["Build".to_string()]);

        assert_eq!(err.to_string(), "duplicate stage 'Build'");
        assert_eq!(err.stages, vec!["Build".to_string()]);
    }

    #[test]
    fn test_step_error_display() {
        let err = StepError::new("echo", "sink unavailable");
        assert_eq!(err.to_string(), "step 'echo' failed: sink unavailable");
    }

    #[test]
    fn test_notify_error_status() {
        let err = NotifyError::UnexpectedStatus { status: 404 };
        assert_eq!(err.to_string(), "notification rejected with status 404");
    }

    #[test]
    fn test_error_conversion() {
        let validation = PipelineValidationError::new("empty pipeline");
        let err: StagecoachError = validation.into();
        assert!(matches!(err, StagecoachError::Validation(_)));
    }
}
