//! Notification capability and shipped sinks.
//!
//! The runner hands the final aggregate result to a [`NotificationSink`]
//! explicitly; there is no ambient build-state lookup.

mod slack;

pub use slack::{SlackConfig, SlackNotifier};

use crate::core::RunResult;
use crate::errors::NotifyError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What a notifier is told about a finished run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunNotice {
    /// The pipeline name.
    pub pipeline: String,
    /// The run id.
    pub run_id: Uuid,
    /// The final aggregate result.
    pub result: RunResult,
    /// Total run duration in milliseconds.
    pub duration_ms: f64,
    /// The first failed stage, when the run failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_stage: Option<String>,
}

impl RunNotice {
    /// Creates a new run notice.
    #[must_use]
    pub fn new(pipeline: impl Into<String>, run_id: Uuid, result: RunResult) -> Self {
        Self {
            pipeline: pipeline.into(),
            run_id,
            result,
            duration_ms: 0.0,
            failed_stage: None,
        }
    }

    /// Sets the run duration.
    #[must_use]
    pub fn with_duration_ms(mut self, duration_ms: f64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Sets the failed stage.
    #[must_use]
    pub fn with_failed_stage(mut self, stage: impl Into<String>) -> Self {
        self.failed_stage = Some(stage.into());
        self
    }

    /// Returns the result as its notification string.
    #[must_use]
    pub fn result_text(&self) -> String {
        self.result.to_string()
    }
}

/// Capability for delivering a run's final result somewhere.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Delivers the notice.
    async fn notify(&self, notice: &RunNotice) -> Result<(), NotifyError>;
}

/// A sink that writes the notice to the tracing log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingNotifier;

#[async_trait]
impl NotificationSink for LoggingNotifier {
    async fn notify(&self, notice: &RunNotice) -> Result<(), NotifyError> {
        tracing::info!(
            pipeline = %notice.pipeline,
            run_id = %notice.run_id,
            result = %notice.result,
            duration_ms = notice.duration_ms,
            "Pipeline run finished"
        );
        Ok(())
    }
}

/// A sink that discards notices.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpNotifier;

#[async_trait]
impl NotificationSink for NoOpNotifier {
    async fn notify(&self, _notice: &RunNotice) -> Result<(), NotifyError> {
        Ok(())
    }
}
