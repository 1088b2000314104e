// Tool-calling providers
//
// A provider turns a conversation plus a tool list into a single model turn:
// either a final text response or a set of requested tool calls. Agents loop
// over provider turns until the model stops asking for tools.

pub mod openai;
pub mod prompt_based;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;
use crate::tools::{Tool, ToolCall};
use gavel_abstraction::ChatMessage;

pub use openai::OpenAiToolProvider;
pub use prompt_based::PromptToolProvider;

/// Reasons why a provider turn finished
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum FinishReason {
    /// Model completed successfully
    Stop,
    /// Model hit its output length limit
    Length,
    /// Model error
    Error,
}

impl fmt::Display for FinishReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stop => write!(f, "stop"),
            Self::Length => write!(f, "length"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Result of a single provider turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallTurn {
    /// Text response from the model (may be empty when tools are requested)
    pub response: String,
    /// Tool calls requested by the model
    pub tool_calls: Vec<ToolCall>,
    /// Reason the turn finished
    pub finish_reason: FinishReason,
}

impl ToolCallTurn {
    /// Create a new turn
    pub fn new(response: String, tool_calls: Vec<ToolCall>, finish_reason: FinishReason) -> Self {
        Self { response, tool_calls, finish_reason }
    }

    /// Check if there are tool calls to execute
    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

/// Model-agnostic tool-calling provider trait
///
/// Implementations provide tool calling using different techniques: native
/// function calling where the API supports it, or prompt-engineered JSON
/// tool calls otherwise.
#[async_trait]
pub trait ToolCallProvider: Send + Sync {
    /// Run one model turn over the conversation with the given tools available.
    ///
    /// # Arguments
    /// * `messages` - Full conversation so far, system message first
    /// * `tools` - Tools the model may request
    ///
    /// # Returns
    /// The model's turn: final text, or tool calls to execute.
    async fn complete_with_tools(
        &self,
        messages: &[ChatMessage],
        tools: &[Tool],
    ) -> Result<ToolCallTurn>;

    /// Check if the provider has native function calling support
    fn supports_function_calling(&self) -> bool;

    /// Get provider name for logging/debugging
    fn provider_name(&self) -> &'static str;
}
