//! Chat agent implementation.
//!
//! This agent carries a fixed system instruction and maintains conversation
//! context across multiple interactions.

use crate::error::Result;
use crate::Worker;
use async_trait::async_trait;
use gavel_abstraction::{ChatMessage, Model};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, warn};

const DEFAULT_MAX_HISTORY: usize = 100;

/// A conversational worker bound to a model and a system instruction.
pub struct ChatAgent {
    /// The agent's unique ID.
    id: String,
    /// The agent's description.
    description: String,
    /// System instruction injected at the head of every completion.
    system_instruction: String,
    /// The model this agent converses with.
    model: Arc<dyn Model>,
    /// Conversation history.
    history: Arc<RwLock<Vec<ChatMessage>>>,
    /// Maximum number of messages to keep in history.
    max_history: usize,
}

impl std::fmt::Debug for ChatAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatAgent")
            .field("id", &self.id)
            .field("model_id", &self.model.model_id())
            .finish_non_exhaustive()
    }
}

impl ChatAgent {
    /// Creates a new `ChatAgent`.
    ///
    /// # Arguments
    /// * `id` - The agent ID
    /// * `description` - The agent description
    /// * `system_instruction` - The system instruction (empty string accepted)
    /// * `model` - The model to converse with
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        system_instruction: impl Into<String>,
        model: Arc<dyn Model>,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            system_instruction: system_instruction.into(),
            model,
            history: Arc::new(RwLock::new(Vec::new())),
            max_history: DEFAULT_MAX_HISTORY,
        }
    }

    /// Sets a custom maximum history size.
    #[must_use]
    pub fn with_max_history(mut self, max_history: usize) -> Self {
        self.max_history = max_history;
        self
    }

    /// Returns the system instruction.
    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    /// Clears the conversation history.
    pub async fn clear_history(&self) {
        let mut history = self.history.write().await;
        history.clear();
        debug!(agent_id = %self.id, "ChatAgent history cleared");
    }

    /// Returns the current conversation history length.
    pub async fn history_len(&self) -> usize {
        let history = self.history.read().await;
        history.len()
    }
}

#[async_trait]
impl Worker for ChatAgent {
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
            "ChatAgent processing"
        );

        // Add user message to history
        let mut history = self.history.write().await;
        history.push(ChatMessage::user(input));

        // Build the completion: system instruction first, then history
        let mut messages = Vec::with_capacity(history.len() + 1);
        if !self.system_instruction.is_empty() {
            messages.push(ChatMessage::system(self.system_instruction.clone()));
        }
        messages.extend(history.iter().cloned());
        drop(history); // Release lock before async operation

        let response =
            self.model.generate_chat_completion(&messages, None).await.map_err(|e| {
                error!(agent_id = %self.id, error = %e, "Model generation failed");
                e
            })?;

        // Add assistant response to history and trim if necessary
        let mut history = self.history.write().await;
        history.push(ChatMessage::assistant(response.content.clone()));

        if history.len() > self.max_history {
            let excess = history.len() - self.max_history;
            history.drain(..excess);
            warn!(
                agent_id = %self.id,
                trimmed = excess,
                "ChatAgent history trimmed"
            );
        }

        debug!(
            agent_id = %self.id,
            response_len = response.content.len(),
            history_len = history.len(),
            "ChatAgent completed"
        );

        Ok(response.content)
    }
}
