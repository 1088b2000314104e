//! Workforce orchestration for Gavel.
//!
//! A `Workforce` is an ordered collection of named workers that processes a
//! single task into an aggregated report: the owning worker gathers
//! background context, every other worker contributes its assessment, and
//! the owning worker reconciles the contributions into a summary.

pub mod agents;
pub mod error;
pub mod provider;
pub mod task;
pub mod tools;

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub use agents::{ChatAgent, ResearchAgent};
pub use error::WorkforceError;
pub use provider::{
    FinishReason, OpenAiToolProvider, PromptToolProvider, ToolCallProvider, ToolCallTurn,
};
pub use task::Task;
pub use tools::{
    DuckDuckGoTool, GoogleSearchTool, Tool, ToolArguments, ToolCall, ToolHandler, ToolParameters,
    ToolResult,
};

/// A trait that defines the interface for any workforce member.
#[async_trait]
pub trait Worker: Send + Sync {
    /// Returns the unique ID of the worker.
    fn id(&self) -> &str;

    /// Returns a description of the worker's purpose and capabilities.
    fn description(&self) -> &str;

    /// Processes the given input and returns the worker's textual output.
    ///
    /// # Errors
    /// Returns a `WorkforceError` if processing fails.
    async fn process(&self, input: &str) -> std::result::Result<String, WorkforceError>;
}

/// A labeled worker registration.
pub struct WorkerEntry {
    /// Human-readable role description shown in reports.
    pub label: String,
    /// The underlying worker.
    pub worker: Arc<dyn Worker>,
}

/// An ordered, insert-only collection of named workers.
///
/// Registration order is preserved; a workforce is consumed exactly once by
/// [`Workforce::process_task`].
pub struct Workforce {
    /// Workforce name, used for logging.
    name: String,
    /// Registered workers in registration order.
    workers: Vec<WorkerEntry>,
}

impl std::fmt::Debug for Workforce {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workforce")
            .field("name", &self.name)
            .field("worker_count", &self.workers.len())
            .finish_non_exhaustive()
    }
}

impl Workforce {
    /// Creates a new empty workforce.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), workers: Vec::new() }
    }

    /// Registers a worker under a human-readable label.
    ///
    /// Returns the workforce for chaining. Registration is append-only.
    #[must_use]
    pub fn add_single_agent_worker(
        mut self,
        label: impl Into<String>,
        worker: Arc<dyn Worker>,
    ) -> Self {
        let label = label.into();
        debug!(workforce = %self.name, worker_id = %worker.id(), label = %label, "Registering worker");
        self.workers.push(WorkerEntry { label, worker });
        self
    }

    /// Returns the workforce name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of registered workers.
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Returns worker labels in registration order.
    pub fn worker_labels(&self) -> Vec<&str> {
        self.workers.iter().map(|e| e.label.as_str()).collect()
    }

    /// Processes the task and attaches the aggregated report to it.
    ///
    /// Consumes the workforce: registration is necessarily finalized before
    /// processing, and the container cannot be reused for another task.
    ///
    /// # Errors
    /// Returns a `WorkforceError` if the owner is unknown, the workforce is
    /// empty, or any worker fails. There is no partial-result recovery.
    pub async fn process_task(
        self,
        mut task: Task,
    ) -> std::result::Result<Task, WorkforceError> {
        if self.workers.is_empty() {
            return Err(WorkforceError::NoWorkers);
        }

        let owner = self
            .workers
            .iter()
            .find(|e| e.worker.id() == task.owner)
            .ok_or_else(|| WorkforceError::WorkerNotFound { id: task.owner.clone() })?;

        if task.human_input {
            warn!(task_id = %task.id, "Human input requested but not supported; proceeding");
        }

        info!(
            workforce = %self.name,
            task_id = %task.id,
            worker_count = self.workers.len(),
            "Processing task"
        );

        // Phase 1: the owning worker gathers background context.
        let notes = owner.worker.process(&Self::context_prompt(&task)).await?;
        debug!(task_id = %task.id, notes_len = notes.len(), "Context gathered");

        // Phase 2: every other worker contributes, in registration order.
        let mut sections = Vec::new();
        for entry in self.workers.iter().filter(|e| e.worker.id() != task.owner) {
            debug!(
                task_id = %task.id,
                worker_id = %entry.worker.id(),
                "Collecting contribution"
            );
            let contribution = entry
                .worker
                .process(&Self::contribution_prompt(&task, &owner.label, &notes))
                .await?;
            sections.push(format!("### {}\n{}", entry.label, contribution));
        }
        let body = sections.join("\n\n");

        // Phase 3: the owning worker reconciles the contributions.
        let summary = owner.worker.process(&Self::summary_prompt(&task, &body)).await?;

        task.result = Some(format!("{body}\n\n### Summary\n{summary}"));
        info!(workforce = %self.name, task_id = %task.id, "Task completed");
        Ok(task)
    }

    fn context_prompt(task: &Task) -> String {
        format!(
            "{}\n\nGather any background information that would help the team complete \
            this task. Report your findings as concise notes.",
            task.content
        )
    }

    fn contribution_prompt(task: &Task, owner_label: &str, notes: &str) -> String {
        format!(
            "{}\n\nBackground notes from {}:\n{}\n\nRespond with your own assessment.",
            task.content, owner_label, notes
        )
    }

    fn summary_prompt(task: &Task, body: &str) -> String {
        format!(
            "{}\n\nExpected output: {}\n\nContributions collected so far:\n{}\n\n\
            Write a concise summary that reconciles the contributions above.",
            task.content, task.expected_output, body
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubWorker {
        id: String,
        reply: String,
    }

    impl StubWorker {
        fn new(id: &str, reply: &str) -> Arc<Self> {
            Arc::new(Self { id: id.to_string(), reply: reply.to_string() })
        }
    }

    #[async_trait]
    impl Worker for StubWorker {
        fn id(&self) -> &str {
            &self.id
        }

        fn description(&self) -> &str {
            "stub"
        }

        async fn process(&self, _input: &str) -> std::result::Result<String, WorkforceError> {
            Ok(self.reply.clone())
        }
    }

    struct FailingWorker;

    #[async_trait]
    impl Worker for FailingWorker {
        fn id(&self) -> &str {
            "failing"
        }

        fn description(&self) -> &str {
            "always fails"
        }

        async fn process(&self, _input: &str) -> std::result::Result<String, WorkforceError> {
            Err(WorkforceError::ToolExecutionFailed("boom".to_string()))
        }
    }

    #[test]
    fn test_registration_order_preserved() {
        let workforce = Workforce::new("Test")
            .add_single_agent_worker("First", StubWorker::new("a", "x"))
            .add_single_agent_worker("Second", StubWorker::new("b", "y"))
            .add_single_agent_worker("Third", StubWorker::new("c", "z"));

        assert_eq!(workforce.worker_count(), 3);
        assert_eq!(workforce.worker_labels(), vec!["First", "Second", "Third"]);
    }

    #[tokio::test]
    async fn test_process_task_aggregates_contributions() {
        let workforce = Workforce::new("Test")
            .add_single_agent_worker("Critic", StubWorker::new("critic", "Score: 2/4"))
            .add_single_agent_worker("Fan", StubWorker::new("fan", "Score: 4/4"))
            .add_single_agent_worker("Helper", StubWorker::new("helper", "Notes here"));

        let task = Task::new("Evaluate the widget", "a report", "helper");
        let task = workforce.process_task(task).await.unwrap();

        let result = task.result.unwrap();
        assert!(result.contains("### Critic"));
        assert!(result.contains("### Fan"));
        assert!(result.contains("Score: 2/4"));
        assert!(result.contains("Score: 4/4"));
        assert!(result.contains("### Summary"));
        // The owner contributes notes and summary, not a section of its own.
        assert!(!result.contains("### Helper"));
    }

    #[tokio::test]
    async fn test_process_task_unknown_owner() {
        let workforce =
            Workforce::new("Test").add_single_agent_worker("Only", StubWorker::new("only", "x"));

        let task = Task::new("content", "output", "missing");
        let err = workforce.process_task(task).await.unwrap_err();
        match err {
            WorkforceError::WorkerNotFound { id } => assert_eq!(id, "missing"),
            other => panic!("Expected WorkerNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_process_task_empty_workforce() {
        let workforce = Workforce::new("Test");
        let task = Task::new("content", "output", "anyone");
        let err = workforce.process_task(task).await.unwrap_err();
        assert!(matches!(err, WorkforceError::NoWorkers));
    }

    #[tokio::test]
    async fn test_process_task_worker_failure_propagates() {
        let workforce = Workforce::new("Test")
            .add_single_agent_worker("Broken", Arc::new(FailingWorker))
            .add_single_agent_worker("Helper", StubWorker::new("helper", "notes"));

        let task = Task::new("content", "output", "helper");
        let err = workforce.process_task(task).await.unwrap_err();
        assert!(matches!(err, WorkforceError::ToolExecutionFailed(_)));
    }
}
