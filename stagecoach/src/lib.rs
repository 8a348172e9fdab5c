//! # Stagecoach
//!
//! A staged delivery pipeline runner.
//!
//! Stagecoach executes a declarative, ordered stage list on a single
//! allocated agent workspace:
//!
//! - **Fixed-order stages**: declaration order is execution order; no
//!   branching, retries, or parallelism
//! - **Injected capabilities**: notification and workspace cleanup are
//!   traits handed to the declaration, never resolved by name at runtime
//! - **Unconditional post block**: the notifier receives the run's final
//!   result and the cleaner releases the workspace, exactly once per run,
//!   on success and failure alike
//! - **Event-driven observability**: run lifecycle events flow through a
//!   pluggable sink
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stagecoach::prelude::*;
//! use std::sync::Arc;
//!
//! let notifier = Arc::new(SlackNotifier::from_env()?);
//! let spec = delivery_pipeline(notifier, Arc::new(DirCleaner::new()))?;
//!
//! let runner = PipelineRunner::new(Agent::any("/var/lib/stagecoach"));
//! let report = runner.run(&spec).await?;
//! println!("{}", report.result);
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod context;
pub mod core;
pub mod delivery;
pub mod errors;
pub mod events;
pub mod notify;
pub mod observability;
pub mod pipeline;
pub mod post;
pub mod stages;
pub mod steps;
pub mod testing;
pub mod workspace;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::context::{RunIdentity, StageContext};
    pub use crate::core::{PostFailure, RunReport, RunResult, StageOutcome, StageStatus};
    pub use crate::delivery::delivery_pipeline;
    pub use crate::errors::{
        CleanupError, NotifyError, PipelineValidationError, StagecoachError, StepError,
    };
    pub use crate::events::{CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink};
    pub use crate::notify::{
        LoggingNotifier, NoOpNotifier, NotificationSink, RunNotice, SlackConfig, SlackNotifier,
    };
    pub use crate::pipeline::{PipelineBuilder, PipelineRunner, PipelineSpec, RunnerConfig};
    pub use crate::post::PostBlock;
    pub use crate::stages::StageSpec;
    pub use crate::steps::{EchoStep, FnStep, Step};
    pub use crate::workspace::{
        Agent, AgentLabel, DirCleaner, NoOpCleaner, Workspace, WorkspaceCleaner,
    };
}
