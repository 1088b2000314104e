// Error types for workforce orchestration

use gavel_abstraction::ModelError;
use thiserror::Error;

/// Result type for workforce operations
pub type Result<T> = std::result::Result<T, WorkforceError>;

/// Workforce errors
#[derive(Debug, Error)]
pub enum WorkforceError {
    /// The task names an owner that is not a registered worker
    #[error("Worker not found: {id}")]
    WorkerNotFound {
        /// Worker ID requested by the task
        id: String,
    },

    /// A task was handed to a workforce with no registered workers
    #[error("Workforce has no registered workers")]
    NoWorkers,

    /// Invalid tool arguments
    #[error("Invalid tool arguments for '{tool}': {reason}")]
    InvalidToolArguments {
        /// Tool name
        tool: String,
        /// Reason why arguments are invalid
        reason: String,
    },

    /// Tool execution failed
    #[error("Tool execution failed: {0}")]
    ToolExecutionFailed(String),

    /// Max tool iterations reached
    #[error("Maximum tool iterations ({0}) reached")]
    MaxIterations(u32),

    /// Model error
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
