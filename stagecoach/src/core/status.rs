//! Run result and stage status enums.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The final aggregate result of a pipeline run.
///
/// Rendered as the strings `SUCCESS` / `FAILURE`, which is what the
/// notifier receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunResult {
    /// Every stage completed.
    Success,
    /// At least one stage failed.
    Failure,
}

impl Default for RunResult {
    fn default() -> Self {
        Self::Success
    }
}

impl fmt::Display for RunResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "SUCCESS"),
            Self::Failure => write!(f, "FAILURE"),
        }
    }
}

impl RunResult {
    /// Returns true if the run succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Combines two results; failure dominates.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        if self == Self::Failure || other == Self::Failure {
            Self::Failure
        } else {
            Self::Success
        }
    }
}

/// The execution status of a single stage within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    /// Stage completed successfully.
    Ok,
    /// Stage failed.
    Fail,
    /// Stage did not execute because an earlier stage failed.
    NotRun,
}

impl fmt::Display for StageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "ok"),
            Self::Fail => write!(f, "fail"),
            Self::NotRun => write!(f, "not_run"),
        }
    }
}

impl StageStatus {
    /// Returns true if the status indicates success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Ok)
    }

    /// Returns true if the status indicates failure.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Fail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_result_display() {
        assert_eq!(RunResult::Success.to_string(), "SUCCESS");
        assert_eq!(RunResult::Failure.to_string(), "FAILURE");
    }

    #[test]
    fn test_run_result_and() {
        assert_eq!(RunResult::Success.and(RunResult::Success), RunResult::Success);
        assert_eq!(RunResult::Success.and(RunResult::Failure), RunResult::Failure);
        assert_eq!(RunResult::Failure.and(RunResult::Success), RunResult::Failure);
    }

    #[test]
    fn test_run_result_serialize() {
        let json = serde_json::to_string(&RunResult::Success).unwrap();
        assert_eq!(json, r#""SUCCESS""#);

        let deserialized: RunResult = serde_json::from_str(r#""FAILURE""#).unwrap();
        assert_eq!(deserialized, RunResult::Failure);
    }

    #[test]
    fn test_stage_status_display() {
        assert_eq!(StageStatus::Ok.to_string(), "ok");
        assert_eq!(StageStatus::Fail.to_string(), "fail");
        assert_eq!(StageStatus::NotRun.to_string(), "not_run");
    }

    #[test]
    fn test_stage_status_predicates() {
        assert!(StageStatus::Ok.is_success());
        assert!(StageStatus::Fail.is_failure());
        assert!(!StageStatus::NotRun.is_success());
        assert!(!StageStatus::NotRun.is_failure());
    }
}
