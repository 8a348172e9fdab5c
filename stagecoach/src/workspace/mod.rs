//! Agents, per-run workspaces, and the workspace-cleanup capability.
//!
//! The agent mirrors the original fixed execution-host selection: one
//! agent is chosen per pipeline, and it hands out exactly one workspace
//! directory per run. Releasing the workspace is the post block's job,
//! through the [`WorkspaceCleaner`] capability.

use crate::context::RunIdentity;
use crate::errors::CleanupError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Which execution agent a pipeline asks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentLabel {
    /// Any available agent.
    Any,
    /// An agent with a specific label.
    Labeled(String),
}

impl Default for AgentLabel {
    fn default() -> Self {
        Self::Any
    }
}

impl fmt::Display for AgentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => write!(f, "any"),
            Self::Labeled(name) => write!(f, "{name}"),
        }
    }
}

/// An execution agent owning a base directory for run workspaces.
#[derive(Debug, Clone)]
pub struct Agent {
    label: AgentLabel,
    base_dir: PathBuf,
}

impl Agent {
    /// Creates an agent with the given label and workspace base directory.
    #[must_use]
    pub fn new(label: AgentLabel, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            label,
            base_dir: base_dir.into(),
        }
    }

    /// Creates an `any`-labeled agent.
    #[must_use]
    pub fn any(base_dir: impl Into<PathBuf>) -> Self {
        Self::new(AgentLabel::Any, base_dir)
    }

    /// Returns the agent label.
    #[must_use]
    pub fn label(&self) -> &AgentLabel {
        &self.label
    }

    /// Allocates a fresh workspace directory for the given run.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn allocate(&self, identity: &RunIdentity) -> std::io::Result<Workspace> {
        let root = self.base_dir.join(identity.run_id.to_string());
        std::fs::create_dir_all(&root)?;
        Ok(Workspace {
            run_id: identity.run_id,
            root,
        })
    }
}

/// A per-run workspace directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    run_id: Uuid,
    root: PathBuf,
}

impl Workspace {
    /// Returns the run this workspace belongs to.
    #[must_use]
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Returns the workspace directory path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Returns true if the workspace directory still exists.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.root.is_dir()
    }
}

/// Capability for releasing a run's workspace.
#[async_trait]
pub trait WorkspaceCleaner: Send + Sync {
    /// Cleans the given workspace.
    async fn clean(&self, workspace: &Workspace) -> Result<(), CleanupError>;
}

/// A cleaner that removes the workspace directory recursively.
///
/// Removing an already-absent workspace is not an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirCleaner;

impl DirCleaner {
    /// Creates a new directory cleaner.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl WorkspaceCleaner for DirCleaner {
    async fn clean(&self, workspace: &Workspace) -> Result<(), CleanupError> {
        match tokio::fs::remove_dir_all(workspace.path()).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(CleanupError::Io(err)),
        }
    }
}

/// A cleaner that leaves the workspace in place.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpCleaner;

#[async_trait]
impl WorkspaceCleaner for NoOpCleaner {
    async fn clean(&self, _workspace: &Workspace) -> Result<(), CleanupError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_label_display() {
        assert_eq!(AgentLabel::Any.to_string(), "any");
        assert_eq!(AgentLabel::Labeled("linux".to_string()).to_string(), "linux");
    }

    #[test]
    fn test_allocate_creates_directory() {
        let base = tempfile::tempdir().unwrap();
        let agent = Agent::any(base.path());
        let identity = RunIdentity::new();

        let workspace = agent.allocate(&identity).unwrap();
        assert!(workspace.exists());
        assert_eq!(workspace.run_id(), identity.run_id);
        assert!(workspace.path().starts_with(base.path()));
    }

    #[tokio::test]
    async fn test_dir_cleaner_removes_workspace() {
        let base = tempfile::tempdir().unwrap();
        let agent = Agent::any(base.path());
        let workspace = agent.allocate(&RunIdentity::new()).unwrap();
        std::fs::write(workspace.path().join("artifact.txt"), b"out").unwrap();

        DirCleaner::new().clean(&workspace).await.unwrap();
        assert!(!workspace.exists());
    }

    #[tokio::test]
    async fn test_dir_cleaner_missing_workspace_is_ok() {
        let base = tempfile::tempdir().unwrap();
        let agent = Agent::any(base.path());
        let workspace = agent.allocate(&RunIdentity::new()).unwrap();

        DirCleaner::new().clean(&workspace).await.unwrap();
        // Second clean sees no directory.
        DirCleaner::new().clean(&workspace).await.unwrap();
    }

    #[tokio::test]
    async fn test_noop_cleaner_keeps_workspace() {
        let base = tempfile::tempdir().unwrap();
        let agent = Agent::any(base.path());
        let workspace = agent.allocate(&RunIdentity::new()).unwrap();

        NoOpCleaner.clean(&workspace).await.unwrap();
        assert!(workspace.exists());
    }
}
