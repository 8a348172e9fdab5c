//! Pipeline builder with validation.

use super::PipelineSpec;
use crate::errors::PipelineValidationError;
use crate::post::PostBlock;
use crate::stages::StageSpec;
use crate::workspace::AgentLabel;

/// Builder for validated pipeline declarations.
#[derive(Debug, Clone)]
pub struct PipelineBuilder {
    name: String,
    agent: AgentLabel,
    stages: Vec<StageSpec>,
    post: Option<PostBlock>,
}

impl PipelineBuilder {
    /// Creates a new pipeline builder.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            agent: AgentLabel::Any,
            stages: Vec::new(),
            post: None,
        }
    }

    /// Sets the agent label.
    #[must_use]
    pub fn agent(mut self, label: AgentLabel) -> Self {
        self.agent = label;
        self
    }

    /// Appends a stage.
    ///
    /// # Errors
    ///
    /// Returns an error if the stage is invalid or its name duplicates an
    /// already-declared stage.
    pub fn stage(mut self, stage: StageSpec) -> Result<Self, PipelineValidationError> {
        stage.validate()?;

        if self.stages.iter().any(|s| s.name == stage.name) {
            return Err(PipelineValidationError::new(format!(
                "duplicate stage '{}'",
                stage.name
            ))
            .with_stages(vec![stage.name]));
        }

        self.stages.push(stage);
        Ok(self)
    }

    /// Sets the post block.
    ///
    /// Defaults to a no-op block when not set.
    #[must_use]
    pub fn post(mut self, post: PostBlock) -> Self {
        self.post = Some(post);
        self
    }

    /// Builds the pipeline specification.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty or no stages were declared.
    pub fn build(self) -> Result<PipelineSpec, PipelineValidationError> {
        if self.name.trim().is_empty() {
            return Err(PipelineValidationError::new(
                "pipeline name cannot be empty or whitespace-only",
            ));
        }
        if self.stages.is_empty() {
            return Err(PipelineValidationError::new(format!(
                "pipeline '{}' declares no stages",
                self.name
            )));
        }

        Ok(PipelineSpec::new(
            self.name,
            self.agent,
            self.stages,
            self.post.unwrap_or_else(PostBlock::noop),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_ordered_stages() {
        let spec = PipelineBuilder::new("delivery")
            .stage(StageSpec::echo("Build", "Building..."))
            .unwrap()
            .stage(StageSpec::echo("Test", "Testing..."))
            .unwrap()
            .stage(StageSpec::echo("Deploy", "Deploying..."))
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(spec.stage_names(), vec!["Build", "Test", "Deploy"]);
    }

    #[test]
    fn test_duplicate_stage_rejected() {
        let err = PipelineBuilder::new("delivery")
            .stage(StageSpec::echo("Build", "Building..."))
            .unwrap()
            .stage(StageSpec::echo("Build", "again"))
            .unwrap_err();

        assert_eq!(err.stages, vec!["Build".to_string()]);
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = PipelineBuilder::new("   ")
            .stage(StageSpec::echo("Build", "Building..."))
            .unwrap()
            .build()
            .unwrap_err();

        assert!(err.message.contains("name"));
    }

    #[test]
    fn test_stageless_pipeline_rejected() {
        let err = PipelineBuilder::new("delivery").build().unwrap_err();
        assert!(err.message.contains("no stages"));
    }

    #[test]
    fn test_invalid_stage_rejected() {
        let err = PipelineBuilder::new("delivery")
            .stage(StageSpec::new("Build"))
            .unwrap_err();

        assert!(err.message.contains("no steps"));
    }

    #[test]
    fn test_agent_label() {
        let spec = PipelineBuilder::new("delivery")
            .agent(AgentLabel::Labeled("linux".to_string()))
            .stage(StageSpec::echo("Build", "Building..."))
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(spec.agent(), &AgentLabel::Labeled("linux".to_string()));
    }
}
