//! Workflow orchestration services.

pub mod engine;

pub use engine::{FinishedTask, WorkflowEngine, WorkflowError, WorkflowResult};
