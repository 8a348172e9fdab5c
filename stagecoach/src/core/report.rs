//! Per-run report assembled by the runner.

use super::{RunResult, StageOutcome};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A failure recorded while driving the post block.
///
/// Post-action failures never abort the run or the remaining post actions;
/// they are collected here instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostFailure {
    /// Which post action failed (`notify` or `clean`).
    pub action: String,
    /// The failure message.
    pub error: String,
}

impl PostFailure {
    /// Creates a new post-action failure record.
    #[must_use]
    pub fn new(action: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            error: error.into(),
        }
    }
}

/// The complete record of one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// The run id.
    pub run_id: Uuid,

    /// The pipeline name.
    pub pipeline: String,

    /// The final aggregate result.
    pub result: RunResult,

    /// Per-stage outcomes, in declaration order.
    pub stages: Vec<StageOutcome>,

    /// Failures recorded while driving the post block.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub post_failures: Vec<PostFailure>,

    /// Total run duration in milliseconds.
    pub duration_ms: f64,
}

impl RunReport {
    /// Returns true if the run succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.result.is_success()
    }

    /// Number of stages that passed.
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.stages.iter().filter(|s| s.passed()).count()
    }

    /// The first failed stage, if any.
    #[must_use]
    pub fn failed_stage(&self) -> Option<&StageOutcome> {
        self.stages.iter().find(|s| s.status.is_failure())
    }

    /// Number of stages that actually executed.
    #[must_use]
    pub fn executed_count(&self) -> usize {
        self.stages
            .iter()
            .filter(|s| s.status != super::StageStatus::NotRun)
            .count()
    }
}
