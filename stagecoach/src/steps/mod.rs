//! Step trait and the shipped step implementations.
//!
//! Steps are the smallest executable actions inside a stage. The stock
//! delivery declaration uses [`EchoStep`] only; real work plugs in through
//! the [`Step`] trait.

use crate::context::StageContext;
use crate::errors::StepError;
use async_trait::async_trait;
use std::fmt::Debug;

/// Trait for stage steps.
#[async_trait]
pub trait Step: Send + Sync + Debug {
    /// Returns the name of the step.
    fn name(&self) -> &str;

    /// Executes the step.
    ///
    /// # Errors
    ///
    /// Returns an error if the step fails, which fails the enclosing stage.
    async fn run(&self, ctx: &StageContext) -> Result<(), StepError>;
}

/// A step that writes a fixed console line.
#[derive(Debug, Clone)]
pub struct EchoStep {
    line: String,
}

impl EchoStep {
    /// Creates an echo step for the given line.
    #[must_use]
    pub fn new(line: impl Into<String>) -> Self {
        Self { line: line.into() }
    }

    /// Returns the line this step writes.
    #[must_use]
    pub fn line(&self) -> &str {
        &self.line
    }
}

#[async_trait]
impl Step for EchoStep {
    fn name(&self) -> &str {
        "echo"
    }

    async fn run(&self, ctx: &StageContext) -> Result<(), StepError> {
        ctx.echo(&self.line);
        Ok(())
    }
}

/// A function-based step for ad-hoc work.
pub struct FnStep<F>
where
    F: Fn(&StageContext) -> Result<(), StepError> + Send + Sync,
{
    name: String,
    func: F,
}

impl<F> FnStep<F>
where
    F: Fn(&StageContext) -> Result<(), StepError> + Send + Sync,
{
    /// Creates a new function-based step.
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> Debug for FnStep<F>
where
    F: Fn(&StageContext) -> Result<(), StepError> + Send + Sync,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnStep").field("name", &self.name).finish()
    }
}

#[async_trait]
impl<F> Step for FnStep<F>
where
    F: Fn(&StageContext) -> Result<(), StepError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, ctx: &StageContext) -> Result<(), StepError> {
        (self.func)(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::RunIdentity;
    use crate::events::CollectingEventSink;
    use crate::workspace::Agent;
    use std::sync::Arc;

    fn test_context(sink: Arc<CollectingEventSink>) -> (StageContext, tempfile::TempDir) {
        let base = tempfile::tempdir().unwrap();
        let identity = RunIdentity::new();
        let workspace = Agent::any(base.path()).allocate(&identity).unwrap();
        let ctx = StageContext::new(identity, "delivery", "Build", workspace, sink);
        (ctx, base)
    }

    #[tokio::test]
    async fn test_echo_step() {
        let sink = Arc::new(CollectingEventSink::new());
        let (ctx, _base) = test_context(sink.clone());

        let step = EchoStep::new("Building...");
        assert_eq!(step.name(), "echo");
        assert_eq!(step.line(), "Building...");

        step.run(&ctx).await.unwrap();

        let echoes = sink.with_prefix("step.echo");
        assert_eq!(echoes.len(), 1);
        assert_eq!(echoes[0].1.as_ref().unwrap()["line"], "Building...");
    }

    #[tokio::test]
    async fn test_fn_step_ok() {
        let sink = Arc::new(CollectingEventSink::new());
        let (ctx, _base) = test_context(sink);

        let step = FnStep::new("touch", |ctx: &StageContext| {
            assert!(ctx.workspace().exists());
            Ok(())
        });

        assert_eq!(step.name(), "touch");
        step.run(&ctx).await.unwrap();
    }

    #[tokio::test]
    async fn test_fn_step_failure() {
        let sink = Arc::new(CollectingEventSink::new());
        let (ctx, _base) = test_context(sink);

        let step = FnStep::new("broken", |_ctx: &StageContext| {
            Err(StepError::new("broken", "intentional"))
        });

        let err = step.run(&ctx).await.unwrap_err();
        assert_eq!(err.step, "broken");
    }
}
