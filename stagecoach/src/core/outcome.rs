//! Per-stage outcome record.

use super::StageStatus;
use serde::{Deserialize, Serialize};

/// The recorded outcome of one stage within a run.
///
/// Immutable once created; the runner appends one per declared stage, in
/// declaration order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageOutcome {
    /// The stage name.
    pub stage: String,

    /// The execution status.
    pub status: StageStatus,

    /// Error message (for failed stages).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Wall-clock duration in milliseconds. Zero for stages that did not run.
    #[serde(default)]
    pub duration_ms: f64,
}

impl StageOutcome {
    /// Creates a successful outcome.
    #[must_use]
    pub fn ok(stage: impl Into<String>, duration_ms: f64) -> Self {
        Self {
            stage: stage.into(),
            status: StageStatus::Ok,
            error: None,
            duration_ms,
        }
    }

    /// Creates a failed outcome with an error message.
    #[must_use]
    pub fn fail(stage: impl Into<String>, error: impl Into<String>, duration_ms: f64) -> Self {
        Self {
            stage: stage.into(),
            status: StageStatus::Fail,
            error: Some(error.into()),
            duration_ms,
        }
    }

    /// Creates an outcome for a stage cut off by an earlier failure.
    #[must_use]
    pub fn not_run(stage: impl Into<String>) -> Self {
        Self {
            stage: stage.into(),
            status: StageStatus::NotRun,
            error: None,
            duration_ms: 0.0,
        }
    }

    /// Returns true if the stage completed successfully.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.status.is_success()
    }
}
