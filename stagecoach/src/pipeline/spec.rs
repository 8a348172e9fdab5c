//! The immutable pipeline declaration.

use crate::post::PostBlock;
use crate::stages::StageSpec;
use crate::workspace::AgentLabel;
use std::fmt;

/// A validated pipeline declaration.
///
/// Defined once through [`super::PipelineBuilder`], executed per run,
/// never mutated. Stage order is fixed at declaration time.
#[derive(Clone)]
pub struct PipelineSpec {
    name: String,
    agent: AgentLabel,
    stages: Vec<StageSpec>,
    post: PostBlock,
}

impl PipelineSpec {
    pub(crate) fn new(
        name: String,
        agent: AgentLabel,
        stages: Vec<StageSpec>,
        post: PostBlock,
    ) -> Self {
        Self {
            name,
            agent,
            stages,
            post,
        }
    }

    /// Returns the pipeline name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the requested agent label.
    #[must_use]
    pub fn agent(&self) -> &AgentLabel {
        &self.agent
    }

    /// Returns the stages, in declaration order.
    #[must_use]
    pub fn stages(&self) -> &[StageSpec] {
        &self.stages
    }

    /// Returns the post block.
    #[must_use]
    pub fn post(&self) -> &PostBlock {
        &self.post
    }

    /// Returns the stage names, in declaration order.
    #[must_use]
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.name.as_str()).collect()
    }

    /// Returns the number of stages.
    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }
}

impl fmt::Debug for PipelineSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineSpec")
            .field("name", &self.name)
            .field("agent", &self.agent)
            .field("stages", &self.stage_names())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::PipelineBuilder;

    #[test]
    fn test_spec_accessors() {
        let spec = PipelineBuilder::new("delivery")
            .stage(StageSpec::echo("Build", "Building..."))
            .unwrap()
            .stage(StageSpec::echo("Test", "Testing..."))
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(spec.name(), "delivery");
        assert_eq!(spec.agent(), &AgentLabel::Any);
        assert_eq!(spec.stage_count(), 2);
        assert_eq!(spec.stage_names(), vec!["Build", "Test"]);
    }
}
