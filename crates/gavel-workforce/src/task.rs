//! Task definition for workforce processing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A unit of work handed to a workforce.
///
/// A task is created once per invocation, mutated in place by the workforce
/// to attach its result, and discarded after the result is read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique task ID.
    pub id: String,
    /// What the workforce should do.
    pub content: String,
    /// Description of the expected output shape.
    pub expected_output: String,
    /// ID of the worker that owns (coordinates) this task.
    pub owner: String,
    /// Whether the task may pause for human input.
    pub human_input: bool,
    /// When the task was created.
    pub created_at: DateTime<Utc>,
    /// The final result, attached by the workforce.
    pub result: Option<String>,
}

impl Task {
    /// Creates a new task owned by the given worker.
    #[must_use]
    pub fn new(
        content: impl Into<String>,
        expected_output: impl Into<String>,
        owner: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
            expected_output: expected_output.into(),
            owner: owner.into(),
            human_input: false,
            created_at: Utc::now(),
            result: None,
        }
    }

    /// Sets the human-input flag.
    #[must_use]
    pub fn with_human_input(mut self, human_input: bool) -> Self {
        self.human_input = human_input;
        self
    }
}
