//! The post-run block: notify, then clean.
//!
//! The block runs exactly once per run, after the stages, on success and
//! failure alike. Its two actions execute in fixed declaration order and a
//! failing action never prevents the remaining one from running; failures
//! are collected into the run report instead.

use crate::core::PostFailure;
use crate::events::EventSink;
use crate::notify::{NoOpNotifier, NotificationSink, RunNotice};
use crate::workspace::{NoOpCleaner, Workspace, WorkspaceCleaner};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// The post-run block of a pipeline declaration.
#[derive(Clone)]
pub struct PostBlock {
    notifier: Arc<dyn NotificationSink>,
    cleaner: Arc<dyn WorkspaceCleaner>,
}

impl PostBlock {
    /// Creates a post block from the two injected capabilities.
    #[must_use]
    pub fn new(notifier: Arc<dyn NotificationSink>, cleaner: Arc<dyn WorkspaceCleaner>) -> Self {
        Self { notifier, cleaner }
    }

    /// Creates a post block that notifies nowhere and keeps the workspace.
    #[must_use]
    pub fn noop() -> Self {
        Self::new(Arc::new(NoOpNotifier), Arc::new(NoOpCleaner))
    }

    /// Drives the block: notifier first, cleaner second.
    ///
    /// Each action gets the full `action_timeout`. Failures and timeouts
    /// are returned; they never propagate as errors.
    pub async fn run(
        &self,
        notice: &RunNotice,
        workspace: &Workspace,
        events: &Arc<dyn EventSink>,
        action_timeout: Duration,
    ) -> Vec<PostFailure> {
        events.try_emit(
            "post.started",
            Some(serde_json::json!({"run_id": notice.run_id})),
        );

        let mut failures = Vec::new();

        match tokio::time::timeout(action_timeout, self.notifier.notify(notice)).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                warn!(action = "notify", error = %err, "Post action failed");
                failures.push(PostFailure::new("notify", err.to_string()));
            }
            Err(_) => {
                warn!(action = "notify", "Post action timed out");
                failures.push(PostFailure::new("notify", "timed out"));
            }
        }

        match tokio::time::timeout(action_timeout, self.cleaner.clean(workspace)).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                warn!(action = "clean", error = %err, "Post action failed");
                failures.push(PostFailure::new("clean", err.to_string()));
            }
            Err(_) => {
                warn!(action = "clean", "Post action timed out");
                failures.push(PostFailure::new("clean", "timed out"));
            }
        }

        for failure in &failures {
            events.try_emit(
                "post.action.failed",
                Some(serde_json::json!({
                    "action": failure.action,
                    "error": failure.error,
                })),
            );
        }

        events.try_emit(
            "post.finished",
            Some(serde_json::json!({"failures": failures.len()})),
        );

        failures
    }
}

impl fmt::Debug for PostBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostBlock").finish_non_exhaustive()
    }
}
