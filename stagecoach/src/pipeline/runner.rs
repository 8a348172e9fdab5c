//! Sequential pipeline execution.

use super::PipelineSpec;
use crate::context::{RunIdentity, StageContext};
use crate::core::{RunReport, RunResult, StageOutcome};
use crate::errors::{StagecoachError, StepError};
use crate::events::{EventSink, NoOpEventSink};
use crate::notify::RunNotice;
use crate::workspace::Agent;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Runner configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Timeout applied to each post action, in seconds.
    #[serde(default = "default_post_action_timeout")]
    pub post_action_timeout_seconds: f64,
}

fn default_post_action_timeout() -> f64 {
    30.0
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            post_action_timeout_seconds: default_post_action_timeout(),
        }
    }
}

impl RunnerConfig {
    /// Creates a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the post-action timeout.
    #[must_use]
    pub fn with_post_action_timeout(mut self, seconds: f64) -> Self {
        self.post_action_timeout_seconds = seconds;
        self
    }

    /// Gets the post-action timeout as a Duration.
    #[must_use]
    pub fn post_action_timeout(&self) -> Duration {
        Duration::from_secs_f64(self.post_action_timeout_seconds)
    }
}

/// Executes pipeline declarations: one linear run per call, stages in
/// declaration order on a single allocated workspace, post block exactly
/// once at the end.
pub struct PipelineRunner {
    agent: Agent,
    events: Arc<dyn EventSink>,
    config: RunnerConfig,
}

impl PipelineRunner {
    /// Creates a runner on the given agent.
    #[must_use]
    pub fn new(agent: Agent) -> Self {
        Self {
            agent,
            events: Arc::new(NoOpEventSink),
            config: RunnerConfig::default(),
        }
    }

    /// Sets the event sink.
    #[must_use]
    pub fn with_events(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    /// Sets the runner configuration.
    #[must_use]
    pub fn with_config(mut self, config: RunnerConfig) -> Self {
        self.config = config;
        self
    }

    /// Runs the pipeline once.
    ///
    /// Stage failures do not surface here; they are aggregated into the
    /// returned [`RunReport`], and the post block runs regardless.
    ///
    /// # Errors
    ///
    /// Returns an error only when the run cannot start at all, e.g. the
    /// workspace cannot be allocated.
    pub async fn run(&self, spec: &PipelineSpec) -> Result<RunReport, StagecoachError> {
        let identity = RunIdentity::new();
        let workspace = self.agent.allocate(&identity)?;
        let start = Instant::now();

        info!(
            pipeline = %spec.name(),
            run_id = %identity.run_id,
            agent = %self.agent.label(),
            "Pipeline run started"
        );
        self.events.try_emit(
            "run.started",
            Some(serde_json::json!({
                "pipeline": spec.name(),
                "run_id": identity.run_id,
                "agent": self.agent.label().to_string(),
            })),
        );

        let mut outcomes: Vec<StageOutcome> = Vec::with_capacity(spec.stage_count());
        let mut failed_stage: Option<String> = None;

        for (index, stage) in spec.stages().iter().enumerate() {
            self.events.try_emit(
                "stage.started",
                Some(serde_json::json!({"stage": stage.name})),
            );

            let stage_start = Instant::now();
            let ctx = StageContext::new(
                identity.clone(),
                spec.name(),
                stage.name.as_str(),
                workspace.clone(),
                self.events.clone(),
            );

            let mut step_error: Option<StepError> = None;
            for step in &stage.steps {
                if let Err(err) = step.run(&ctx).await {
                    step_error = Some(err);
                    break;
                }
            }

            let stage_duration_ms = stage_start.elapsed().as_secs_f64() * 1000.0;

            match step_error {
                None => {
                    self.events.try_emit(
                        "stage.completed",
                        Some(serde_json::json!({
                            "stage": stage.name,
                            "duration_ms": stage_duration_ms,
                        })),
                    );
                    outcomes.push(StageOutcome::ok(&stage.name, stage_duration_ms));
                }
                Some(err) => {
                    warn!(stage = %stage.name, error = %err, "Stage failed");
                    self.events.try_emit(
                        "stage.failed",
                        Some(serde_json::json!({
                            "stage": stage.name,
                            "error": err.to_string(),
                            "duration_ms": stage_duration_ms,
                        })),
                    );
                    outcomes.push(StageOutcome::fail(&stage.name, err.to_string(), stage_duration_ms));
                    failed_stage = Some(stage.name.clone());

                    // Later stages do not execute after a failure.
                    for rest in &spec.stages()[index + 1..] {
                        outcomes.push(StageOutcome::not_run(&rest.name));
                    }
                    break;
                }
            }
        }

        let result = if failed_stage.is_some() {
            RunResult::Failure
        } else {
            RunResult::Success
        };
        let stages_duration_ms = start.elapsed().as_secs_f64() * 1000.0;

        let mut notice = RunNotice::new(spec.name(), identity.run_id, result)
            .with_duration_ms(stages_duration_ms);
        if let Some(ref stage) = failed_stage {
            notice = notice.with_failed_stage(stage.clone());
        }

        // The post block runs exactly once, success or failure.
        let post_failures = spec
            .post()
            .run(
                &notice,
                &workspace,
                &self.events,
                self.config.post_action_timeout(),
            )
            .await;

        let duration_ms = start.elapsed().as_secs_f64() * 1000.0;

        info!(
            pipeline = %spec.name(),
            run_id = %identity.run_id,
            result = %result,
            duration_ms,
            "Pipeline run finished"
        );
        self.events.try_emit(
            "run.finished",
            Some(serde_json::json!({
                "run_id": identity.run_id,
                "result": result.to_string(),
                "duration_ms": duration_ms,
            })),
        );

        Ok(RunReport {
            run_id: identity.run_id,
            pipeline: spec.name().to_string(),
            result,
            stages: outcomes,
            post_failures,
            duration_ms,
        })
    }
}

impl fmt::Debug for PipelineRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineRunner")
            .field("agent", &self.agent)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::PipelineBuilder;
    use crate::stages::StageSpec;

    #[test]
    fn test_runner_config_defaults() {
        let config = RunnerConfig::new();
        assert_eq!(config.post_action_timeout_seconds, 30.0);
        assert_eq!(config.post_action_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_runner_config_builder() {
        let config = RunnerConfig::new().with_post_action_timeout(5.0);
        assert_eq!(config.post_action_timeout(), Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_run_returns_report() {
        let base = tempfile::tempdir().unwrap();
        let runner = PipelineRunner::new(Agent::any(base.path()));

        let spec = PipelineBuilder::new("smoke")
            .stage(StageSpec::echo("Build", "Building..."))
            .unwrap()
            .build()
            .unwrap();

        let report = runner.run(&spec).await.unwrap();
        assert!(report.is_success());
        assert_eq!(report.pipeline, "smoke");
        assert_eq!(report.stages.len(), 1);
    }
}
