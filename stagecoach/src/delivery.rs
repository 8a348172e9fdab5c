//! The stock delivery pipeline declaration.
//!
//! Three stages in fixed order, each a single console placeholder, plus
//! the notify-then-clean post block. Real build, test, and deploy work
//! plugs in by replacing the echo steps with custom [`crate::steps::Step`]
//! implementations.

use crate::errors::PipelineValidationError;
use crate::notify::NotificationSink;
use crate::pipeline::{PipelineBuilder, PipelineSpec};
use crate::post::PostBlock;
use crate::stages::StageSpec;
use crate::workspace::WorkspaceCleaner;
use std::sync::Arc;

/// Declares the Build → Test → Deploy delivery pipeline.
///
/// After the stages, the given notifier receives the run's final result
/// and the given cleaner releases the run's workspace, in that order.
///
/// # Errors
///
/// Returns an error if the declaration fails validation, which for this
/// fixed declaration cannot happen in practice.
pub fn delivery_pipeline(
    notifier: Arc<dyn NotificationSink>,
    cleaner: Arc<dyn WorkspaceCleaner>,
) -> Result<PipelineSpec, PipelineValidationError> {
    PipelineBuilder::new("delivery")
        .stage(StageSpec::echo("Build", "Building..."))?
        .stage(StageSpec::echo("Test", "Testing..."))?
        .stage(StageSpec::echo("Deploy", "Deploying..."))?
        .post(PostBlock::new(notifier, cleaner))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NoOpNotifier;
    use crate::workspace::NoOpCleaner;

    #[test]
    fn test_delivery_declaration() {
        let spec = delivery_pipeline(Arc::new(NoOpNotifier), Arc::new(NoOpCleaner)).unwrap();

        assert_eq!(spec.name(), "delivery");
        assert_eq!(spec.stage_names(), vec!["Build", "Test", "Deploy"]);
        for stage in spec.stages() {
            assert_eq!(stage.steps.len(), 1);
        }
    }
}
