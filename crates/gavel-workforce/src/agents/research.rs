//! Research agent implementation.
//!
//! This agent is augmented with callable tools. Each `process` call runs the
//! full loop of: model turn -> tool execution -> result fed back -> repeat,
//! until the model answers with text instead of tool calls.

use crate::error::Result;
use crate::provider::ToolCallProvider;
use crate::tools::{Tool, ToolArguments};
use crate::{Worker, WorkforceError};
use async_trait::async_trait;
use gavel_abstraction::ChatMessage;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

const DEFAULT_MAX_ITERATIONS: u32 = 5;
const DEFAULT_MAX_HISTORY: usize = 100;

/// A tool-augmented worker.
pub struct ResearchAgent {
    /// The agent's unique ID.
    id: String,
    /// The agent's description.
    description: String,
    /// System instruction injected at the head of every completion.
    system_instruction: String,
    /// Provider used to run tool-calling turns.
    provider: Arc<dyn ToolCallProvider>,
    /// Tools available to the agent.
    tools: Vec<Tool>,
    /// Maximum tool iterations per `process` call.
    max_iterations: u32,
    /// Conversation history across `process` calls.
    history: Arc<RwLock<Vec<ChatMessage>>>,
    /// Maximum number of messages to keep in history.
    max_history: usize,
}

impl std::fmt::Debug for ResearchAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResearchAgent")
            .field("id", &self.id)
            .field("provider", &self.provider.provider_name())
            .field("tool_count", &self.tools.len())
            .finish_non_exhaustive()
    }
}

impl ResearchAgent {
    /// Creates a new `ResearchAgent`.
    ///
    /// # Arguments
    /// * `id` - The agent ID
    /// * `description` - The agent description
    /// * `system_instruction` - The system instruction
    /// * `provider` - Tool-calling provider
    /// * `tools` - Tools the agent may invoke
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        system_instruction: impl Into<String>,
        provider: Arc<dyn ToolCallProvider>,
        tools: Vec<Tool>,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            system_instruction: system_instruction.into(),
            provider,
            tools,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            history: Arc::new(RwLock::new(Vec::new())),
            max_history: DEFAULT_MAX_HISTORY,
        }
    }

    /// Sets a custom iteration cap.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Returns the names of the bound tools.
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name.as_str()).collect()
    }

    /// Returns the current conversation history length.
    pub async fn history_len(&self) -> usize {
        let history = self.history.read().await;
        history.len()
    }

    /// Executes one round of requested tool calls, appending each result to
    /// the working message list.
    async fn run_tool_calls(
        &self,
        calls: &[crate::tools::ToolCall],
        messages: &mut Vec<ChatMessage>,
    ) -> Result<()> {
        for call in calls {
            let tool = self.tools.iter().find(|t| t.name == call.name).ok_or_else(|| {
                WorkforceError::ToolExecutionFailed(format!("Unknown tool '{}'", call.name))
            })?;

            debug!(agent_id = %self.id, tool = %call.name, "Executing tool call");

            // Handler failures are reported back to the model, not fatal.
            let text = match tool.execute(&ToolArguments::new(call.arguments.clone())).await {
                Ok(result) => result.output,
                Err(e) => {
                    warn!(agent_id = %self.id, tool = %call.name, error = %e, "Tool failed");
                    format!("Tool '{}' failed: {}", call.name, e)
                }
            };

            messages.push(ChatMessage::user(format!("Tool '{}' returned:\n{}", call.name, text)));
        }
        Ok(())
    }
}

#[async_trait]
impl Worker for ResearchAgent {
    fn id(&self) -> &str {
        &self.id
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn process(&self, input: &str) -> Result<String> {
        debug!(
            agent_id = %self.id,
            input_len = input.len(),
            tool_count = self.tools.len(),
            "ResearchAgent processing"
        );

        let mut history = self.history.write().await;
        history.push(ChatMessage::user(input));

        let mut messages = Vec::with_capacity(history.len() + 1);
        if !self.system_instruction.is_empty() {
            messages.push(ChatMessage::system(self.system_instruction.clone()));
        }
        messages.extend(history.iter().cloned());
        drop(history);

        let mut iterations = 0u32;
        loop {
            if iterations >= self.max_iterations {
                warn!(agent_id = %self.id, iterations, "Tool loop hit iteration cap");
                return Err(WorkforceError::MaxIterations(self.max_iterations));
            }

            let turn = self.provider.complete_with_tools(&messages, &self.tools).await?;

            if !turn.has_tool_calls() {
                // Final answer; persist it and trim history if necessary.
                let mut history = self.history.write().await;
                history.push(ChatMessage::assistant(turn.response.clone()));
                if history.len() > self.max_history {
                    let excess = history.len() - self.max_history;
                    history.drain(..excess);
                }

                debug!(
                    agent_id = %self.id,
                    iterations,
                    response_len = turn.response.len(),
                    "ResearchAgent completed"
                );
                return Ok(turn.response);
            }

            // Tool exchanges stay local to this call; only the final answer
            // enters the persistent history.
            if !turn.response.is_empty() {
                messages.push(ChatMessage::assistant(turn.response.clone()));
            }
            self.run_tool_calls(&turn.tool_calls, &mut messages).await?;

            iterations += 1;
        }
    }
}
