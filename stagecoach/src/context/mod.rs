//! Run identity and the context handed to executing steps.

use crate::events::EventSink;
use crate::workspace::Workspace;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Identifies a single pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunIdentity {
    /// The unique id for this run.
    pub run_id: Uuid,
    /// When the run started.
    pub started_at: DateTime<Utc>,
}

impl Default for RunIdentity {
    fn default() -> Self {
        Self::new()
    }
}

impl RunIdentity {
    /// Creates a new identity with a generated run id.
    #[must_use]
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
        }
    }

    /// Creates an identity with a specific run id.
    #[must_use]
    pub fn with_run_id(run_id: Uuid) -> Self {
        Self {
            run_id,
            started_at: Utc::now(),
        }
    }

    /// Returns a short form of the run id for log lines.
    #[must_use]
    pub fn short_id(&self) -> String {
        self.run_id.to_string()[..8].to_string()
    }
}

/// Context handed to a step while its stage executes.
#[derive(Clone)]
pub struct StageContext {
    identity: RunIdentity,
    pipeline: String,
    stage: String,
    workspace: Workspace,
    events: Arc<dyn EventSink>,
}

impl StageContext {
    /// Creates a new stage context.
    #[must_use]
    pub fn new(
        identity: RunIdentity,
        pipeline: impl Into<String>,
        stage: impl Into<String>,
        workspace: Workspace,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            identity,
            pipeline: pipeline.into(),
            stage: stage.into(),
            workspace,
            events,
        }
    }

    /// Returns the run identity.
    #[must_use]
    pub fn identity(&self) -> &RunIdentity {
        &self.identity
    }

    /// Returns the pipeline name.
    #[must_use]
    pub fn pipeline(&self) -> &str {
        &self.pipeline
    }

    /// Returns the executing stage's name.
    #[must_use]
    pub fn stage(&self) -> &str {
        &self.stage
    }

    /// Returns the run's workspace.
    #[must_use]
    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// Returns the event sink for this run.
    #[must_use]
    pub fn events(&self) -> &Arc<dyn EventSink> {
        &self.events
    }

    /// Writes a console line for this stage.
    ///
    /// The line goes to the tracing log and is mirrored as a `step.echo`
    /// event so sinks observe the output in order.
    pub fn echo(&self, line: &str) {
        tracing::info!(
            pipeline = %self.pipeline,
            stage = %self.stage,
            run_id = %self.identity.run_id,
            "{line}"
        );
        self.events.try_emit(
            "step.echo",
            Some(serde_json::json!({
                "stage": self.stage,
                "line": line,
            })),
        );
    }
}

impl fmt::Debug for StageContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StageContext")
            .field("run_id", &self.identity.run_id)
            .field("pipeline", &self.pipeline)
            .field("stage", &self.stage)
            .field("workspace", &self.workspace)
            .finish_non_exhaustive()
    }
}
