// Prompt-based tool-calling provider
//
// This provider uses prompt engineering to enable tool calling for models
// that don't have native function calling support. It instructs the model
// to output JSON-formatted tool calls.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Write;
use std::sync::Arc;

use super::{FinishReason, ToolCallProvider, ToolCallTurn};
use crate::error::Result;
use crate::tools::{Tool, ToolCall};
use gavel_abstraction::{ChatMessage, Model};

/// Tool call request in JSON format
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ToolCallRequest {
    tool: String,
    arguments: Value,
}

/// Response format for prompt-based tool calling
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum PromptResponse {
    ToolCalls { tool_calls: Vec<ToolCallRequest> },
    Text { response: String },
}

/// Prompt-based tool-calling provider over any `Model`
pub struct PromptToolProvider {
    /// Underlying model to use
    model: Arc<dyn Model>,
}

impl PromptToolProvider {
    /// Create a new prompt-based provider
    pub fn new(model: Arc<dyn Model>) -> Self {
        Self { model }
    }

    /// Build the tool-protocol system prompt with tool definitions
    fn build_tool_prompt(tools: &[Tool]) -> String {
        let mut prompt = String::from(
            "You can use tools to help with the task.\n\n\
            When you need to use a tool, respond ONLY with a JSON object in this exact format:\n\
            {\"tool_calls\": [{\"tool\": \"tool_name\", \"arguments\": {\"arg1\": \"value1\"}}]}\n\n\
            When you don't need to use any tools, respond normally with text.\n\n\
            Available tools:\n\n",
        );

        for tool in tools {
            let _ = write!(
                &mut prompt,
                "Tool: {}\nDescription: {}\nParameters: {}\n\n",
                tool.name,
                tool.description,
                serde_json::to_string_pretty(&tool.parameters).unwrap_or_default()
            );
        }

        prompt.push_str(
            "Remember:\n\
            - Respond with JSON tool_calls when using tools\n\
            - Respond with plain text otherwise\n\
            - Only use one tool call at a time for clarity",
        );

        prompt
    }

    /// Parse a model response to extract tool calls or text
    fn parse_response(response: &str) -> PromptResponse {
        if let Ok(parsed) = serde_json::from_str::<PromptResponse>(response) {
            return parsed;
        }

        PromptResponse::Text { response: response.to_string() }
    }

    /// Convert tool call requests to ToolCall format
    fn convert_tool_calls(requests: Vec<ToolCallRequest>) -> Vec<ToolCall> {
        requests
            .into_iter()
            .enumerate()
            .map(|(i, req)| ToolCall {
                id: format!("call_{}", i),
                name: req.tool,
                arguments: req.arguments,
            })
            .collect()
    }
}

#[async_trait]
impl ToolCallProvider for PromptToolProvider {
    async fn complete_with_tools(
        &self,
        messages: &[ChatMessage],
        tools: &[Tool],
    ) -> Result<ToolCallTurn> {
        let mut request_messages = Vec::with_capacity(messages.len() + 1);
        if !tools.is_empty() {
            request_messages.push(ChatMessage::system(Self::build_tool_prompt(tools)));
        }
        request_messages.extend(messages.iter().cloned());

        let response =
            self.model.generate_chat_completion(&request_messages, None).await?;

        match Self::parse_response(&response.content) {
            PromptResponse::ToolCalls { tool_calls } => {
                let converted_calls = Self::convert_tool_calls(tool_calls);
                Ok(ToolCallTurn::new(String::new(), converted_calls, FinishReason::Stop))
            }
            PromptResponse::Text { response: text } => {
                Ok(ToolCallTurn::new(text, vec![], FinishReason::Stop))
            }
        }
    }

    fn supports_function_calling(&self) -> bool {
        false
    }

    fn provider_name(&self) -> &'static str {
        "prompt_based"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{ToolArguments, ToolHandler, ToolParameters, ToolResult};
    use gavel_models::MockModel;

    struct DummyHandler;

    #[async_trait]
    impl ToolHandler for DummyHandler {
        async fn execute(&self, _args: &ToolArguments) -> Result<ToolResult> {
            Ok(ToolResult::success("test"))
        }
    }

    fn dummy_tool() -> Tool {
        Tool::new(
            "test_tool",
            "A test tool",
            ToolParameters::new().add_property("task", "string", "Task description", true),
            Arc::new(DummyHandler),
        )
    }

    #[test]
    fn test_build_tool_prompt() {
        let tools = vec![dummy_tool()];
        let prompt = PromptToolProvider::build_tool_prompt(&tools);
        assert!(prompt.contains("test_tool"));
        assert!(prompt.contains("A test tool"));
        assert!(prompt.contains("tool_calls"));
    }

    #[test]
    fn test_parse_response_tool_calls() {
        let json_response =
            r#"{"tool_calls": [{"tool": "test_tool", "arguments": {"task": "test"}}]}"#;
        let parsed = PromptToolProvider::parse_response(json_response);

        match parsed {
            PromptResponse::ToolCalls { tool_calls } => {
                assert_eq!(tool_calls.len(), 1);
                assert_eq!(tool_calls[0].tool, "test_tool");
            }
            PromptResponse::Text { .. } => panic!("Expected ToolCalls variant"),
        }
    }

    #[test]
    fn test_parse_response_text() {
        let text_response = "This is a plain text response";
        let parsed = PromptToolProvider::parse_response(text_response);

        match parsed {
            PromptResponse::Text { response } => {
                assert_eq!(response, text_response);
            }
            PromptResponse::ToolCalls { .. } => panic!("Expected Text variant"),
        }
    }

    #[test]
    fn test_convert_tool_calls() {
        let requests = vec![ToolCallRequest {
            tool: "test_tool".to_string(),
            arguments: serde_json::json!({"task": "test"}),
        }];

        let calls = PromptToolProvider::convert_tool_calls(requests);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].id, "call_0");
        assert_eq!(calls[0].name, "test_tool");
    }

    #[tokio::test]
    async fn test_mock_model_turn_is_text() {
        let model = Arc::new(MockModel::new("test-model".to_string()));
        let provider = PromptToolProvider::new(model);

        let messages = vec![ChatMessage::user("Do research")];
        let turn = provider.complete_with_tools(&messages, &[dummy_tool()]).await.unwrap();

        assert!(!turn.has_tool_calls());
        assert!(turn.response.contains("Mock chat response"));
    }

    #[test]
    fn test_supports_function_calling() {
        let model = Arc::new(MockModel::new("test-model".to_string()));
        let provider = PromptToolProvider::new(model);
        assert!(!provider.supports_function_calling());
        assert_eq!(provider.provider_name(), "prompt_based");
    }
}
