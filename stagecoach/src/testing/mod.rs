//! Test doubles for the notification and cleanup seams.
//!
//! Shared by the crate's own tests and usable by downstream crates that
//! need to assert on pipeline behavior without real sinks.

use crate::context::StageContext;
use crate::errors::{CleanupError, NotifyError, StepError};
use crate::notify::{NotificationSink, RunNotice};
use crate::steps::Step;
use crate::workspace::{Workspace, WorkspaceCleaner};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

/// A shared, ordered log of capability invocations.
///
/// Recording doubles push labeled entries so tests can assert cross-double
/// ordering (notifier before cleaner).
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry.
    pub fn push(&self, entry: impl Into<String>) {
        self.entries.lock().push(entry.into());
    }

    /// Returns the entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().clone()
    }
}

/// A notification sink that records every notice it receives.
#[derive(Debug)]
pub struct RecordingNotifier {
    log: CallLog,
    notices: Mutex<Vec<RunNotice>>,
}

impl RecordingNotifier {
    /// Creates a recording notifier writing to the given log.
    #[must_use]
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            notices: Mutex::new(Vec::new()),
        }
    }

    /// Returns the received notices.
    #[must_use]
    pub fn notices(&self) -> Vec<RunNotice> {
        self.notices.lock().clone()
    }

    /// Returns how many times the notifier was invoked.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.notices.lock().len()
    }
}

#[async_trait]
impl NotificationSink for RecordingNotifier {
    async fn notify(&self, notice: &RunNotice) -> Result<(), NotifyError> {
        self.log.push(format!("notify:{}", notice.result));
        self.notices.lock().push(notice.clone());
        Ok(())
    }
}

/// A workspace cleaner that records every workspace it is given.
#[derive(Debug)]
pub struct RecordingCleaner {
    log: CallLog,
    cleaned: Mutex<Vec<Workspace>>,
}

impl RecordingCleaner {
    /// Creates a recording cleaner writing to the given log.
    #[must_use]
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            cleaned: Mutex::new(Vec::new()),
        }
    }

    /// Returns the workspaces handed to the cleaner.
    #[must_use]
    pub fn cleaned(&self) -> Vec<Workspace> {
        self.cleaned.lock().clone()
    }

    /// Returns how many times the cleaner was invoked.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.cleaned.lock().len()
    }
}

#[async_trait]
impl WorkspaceCleaner for RecordingCleaner {
    async fn clean(&self, workspace: &Workspace) -> Result<(), CleanupError> {
        self.log.push("clean");
        self.cleaned.lock().push(workspace.clone());
        Ok(())
    }
}

/// A notification sink that always fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingNotifier;

#[async_trait]
impl NotificationSink for FailingNotifier {
    async fn notify(&self, _notice: &RunNotice) -> Result<(), NotifyError> {
        Err(NotifyError::UnexpectedStatus { status: 502 })
    }
}

/// A step that always fails, for exercising failure paths.
#[derive(Debug, Clone)]
pub struct FailingStep {
    name: String,
}

impl FailingStep {
    /// Creates a failing step with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl Step for FailingStep {
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, _ctx: &StageContext) -> Result<(), StepError> {
        Err(StepError::new(&self.name, "injected failure"))
    }
}
