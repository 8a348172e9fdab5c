//! Stage specifications.

use crate::errors::PipelineValidationError;
use crate::steps::{EchoStep, Step};
use std::sync::Arc;

/// Specification for a single stage: a name and an ordered step list.
///
/// Stages carry no dependencies or conditions; declaration order is
/// execution order.
#[derive(Debug, Clone)]
pub struct StageSpec {
    /// The stage name, unique within a pipeline.
    pub name: String,
    /// The steps, executed in order.
    pub steps: Vec<Arc<dyn Step>>,
}

impl StageSpec {
    /// Creates an empty stage specification.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
        }
    }

    /// Creates a stage holding a single echo step.
    #[must_use]
    pub fn echo(name: impl Into<String>, line: impl Into<String>) -> Self {
        Self::new(name).with_step(Arc::new(EchoStep::new(line)))
    }

    /// Appends a step.
    #[must_use]
    pub fn with_step(mut self, step: Arc<dyn Step>) -> Self {
        self.steps.push(step);
        self
    }

    /// Appends several steps.
    #[must_use]
    pub fn with_steps(mut self, steps: impl IntoIterator<Item = Arc<dyn Step>>) -> Self {
        self.steps.extend(steps);
        self
    }

    /// Validates the stage specification.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty or the stage has no steps.
    pub fn validate(&self) -> Result<(), PipelineValidationError> {
        if self.name.trim().is_empty() {
            return Err(PipelineValidationError::new(
                "stage name cannot be empty or whitespace-only",
            ));
        }
        if self.steps.is_empty() {
            return Err(PipelineValidationError::new(format!(
                "stage '{}' has no steps",
                self.name
            ))
            .with_stages(vec![self.name.clone()]));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::steps::EchoStep;

    #[test]
    fn test_echo_stage() {
        let stage = StageSpec::echo("Build", "Building...");
        assert_eq!(stage.name, "Build");
        assert_eq!(stage.steps.len(), 1);
        assert!(stage.validate().is_ok());
    }

    #[test]
    fn test_with_steps() {
        let stage = StageSpec::new("Test").with_steps([
            Arc::new(EchoStep::new("Testing...")) as Arc<dyn Step>,
            Arc::new(EchoStep::new("still testing")) as Arc<dyn Step>,
        ]);
        assert_eq!(stage.steps.len(), 2);
    }

    #[test]
    fn test_empty_name_rejected() {
        let stage = StageSpec::echo("   ", "hi");
        assert!(stage.validate().is_err());
    }

    #[test]
    fn test_stage_without_steps_rejected() {
        let stage = StageSpec::new("Build");
        let err = stage.validate().unwrap_err();
        assert_eq!(err.stages, vec!["Build".to_string()]);
    }
}
