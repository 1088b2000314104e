// OpenAI tool-calling provider using the function calling API

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::env;
use tracing::{debug, error};

use super::{FinishReason, ToolCallProvider, ToolCallTurn};
use crate::error::{Result, WorkforceError};
use crate::tools::{Tool, ToolCall};
use gavel_abstraction::{ChatMessage, ModelError};

/// OpenAI function definition
#[derive(Debug, Clone, Serialize, Deserialize)]
struct OpenAIFunction {
    name: String,
    description: String,
    parameters: Value,
}

/// OpenAI tool definition
#[derive(Debug, Clone, Serialize, Deserialize)]
struct OpenAITool {
    #[serde(rename = "type")]
    tool_type: String,
    function: OpenAIFunction,
}

/// OpenAI function call
#[derive(Debug, Clone, Serialize, Deserialize)]
struct OpenAIFunctionCall {
    name: String,
    arguments: String,
}

/// OpenAI tool call
#[derive(Debug, Clone, Serialize, Deserialize)]
struct OpenAIToolCall {
    id: String,
    #[serde(rename = "type")]
    call_type: String,
    function: OpenAIFunctionCall,
}

/// OpenAI message
#[derive(Debug, Clone, Serialize, Deserialize)]
struct OpenAIMessage {
    role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<OpenAIToolCall>>,
}

/// OpenAI API request
#[derive(Debug, Clone, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<OpenAITool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// OpenAI choice
#[derive(Debug, Clone, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
    finish_reason: Option<String>,
}

/// OpenAI API response
#[derive(Debug, Clone, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

/// Tool-calling provider backed by OpenAI's function calling API
pub struct OpenAiToolProvider {
    /// Model ID to use
    model_id: String,
    /// API key for authentication
    api_key: String,
    /// HTTP client
    client: Client,
    /// Base URL
    base_url: String,
    /// Temperature for generation
    temperature: f32,
}

impl OpenAiToolProvider {
    /// Create a new provider with an explicit API key
    pub fn new(model_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            api_key: api_key.into(),
            client: Client::new(),
            base_url: "https://api.openai.com/v1".to_string(),
            temperature: 0.7,
        }
    }

    /// Create a new provider with the API key from `OPENAI_API_KEY`
    ///
    /// # Errors
    /// Returns a `WorkforceError` if the environment variable is not set.
    pub fn from_env(model_id: impl Into<String>) -> Result<Self> {
        let api_key = env::var("OPENAI_API_KEY").map_err(|_| {
            WorkforceError::Model(ModelError::UnsupportedModelProvider(
                "OPENAI_API_KEY environment variable not set".to_string(),
            ))
        })?;
        Ok(Self::new(model_id, api_key))
    }

    /// Set temperature
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Override the base URL (e.g., to point at a local test server)
    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Convert tools to OpenAI format
    fn tools_to_openai(tools: &[Tool]) -> Vec<OpenAITool> {
        tools
            .iter()
            .map(|tool| OpenAITool {
                tool_type: "function".to_string(),
                function: OpenAIFunction {
                    name: tool.name.clone(),
                    description: tool.description.clone(),
                    parameters: serde_json::to_value(&tool.parameters).unwrap_or(Value::Null),
                },
            })
            .collect()
    }

    /// Parse tool calls from an OpenAI response
    fn parse_tool_calls(tool_calls: &[OpenAIToolCall]) -> Result<Vec<ToolCall>> {
        tool_calls
            .iter()
            .map(|tc| {
                let arguments: Value =
                    serde_json::from_str(&tc.function.arguments).map_err(|e| {
                        WorkforceError::InvalidToolArguments {
                            tool: tc.function.name.clone(),
                            reason: e.to_string(),
                        }
                    })?;

                Ok(ToolCall { id: tc.id.clone(), name: tc.function.name.clone(), arguments })
            })
            .collect()
    }

    /// Convert finish reason
    fn convert_finish_reason(reason: Option<&str>) -> FinishReason {
        match reason {
            Some("length") => FinishReason::Length,
            Some("content_filter") => FinishReason::Error,
            _ => FinishReason::Stop,
        }
    }

    /// Make API call to OpenAI
    async fn call_openai(&self, request: &OpenAIRequest) -> Result<OpenAIResponse> {
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to send request to OpenAI API");
                WorkforceError::Model(ModelError::RequestError(format!("Network error: {}", e)))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            error!(status = %status, "OpenAI API returned error status");
            if status == 402 || status == 429 {
                return Err(WorkforceError::Model(ModelError::QuotaExceeded {
                    provider: "openai".to_string(),
                    message: Some(error_text),
                }));
            }
            return Err(WorkforceError::Model(ModelError::ModelResponseError(format!(
                "API error ({}): {}",
                status, error_text
            ))));
        }

        response.json().await.map_err(|e| {
            WorkforceError::Model(ModelError::SerializationError(format!(
                "Failed to parse response: {}",
                e
            )))
        })
    }
}

#[async_trait]
impl ToolCallProvider for OpenAiToolProvider {
    async fn complete_with_tools(
        &self,
        messages: &[ChatMessage],
        tools: &[Tool],
    ) -> Result<ToolCallTurn> {
        debug!(
            model_id = %self.model_id,
            message_count = messages.len(),
            tool_count = tools.len(),
            "OpenAiToolProvider running turn"
        );

        let openai_tools = Self::tools_to_openai(tools);
        let tools_opt = if openai_tools.is_empty() { None } else { Some(openai_tools) };

        let openai_messages: Vec<OpenAIMessage> = messages
            .iter()
            .map(|msg| OpenAIMessage {
                role: msg.role.clone(),
                content: Some(msg.content.clone()),
                tool_calls: None,
            })
            .collect();

        let request = OpenAIRequest {
            model: self.model_id.clone(),
            messages: openai_messages,
            tools: tools_opt,
            temperature: Some(self.temperature),
        };

        let response = self.call_openai(&request).await?;

        let choice = response.choices.first().ok_or_else(|| {
            WorkforceError::Model(ModelError::ModelResponseError(
                "No choices in response".to_string(),
            ))
        })?;

        let tool_calls = if let Some(ref tc) = choice.message.tool_calls {
            Self::parse_tool_calls(tc)?
        } else {
            vec![]
        };

        let text_response = choice.message.content.clone().unwrap_or_default();

        if !tool_calls.is_empty() {
            return Ok(ToolCallTurn::new(text_response, tool_calls, FinishReason::Stop));
        }

        let finish_reason = Self::convert_finish_reason(choice.finish_reason.as_deref());
        Ok(ToolCallTurn::new(text_response, vec![], finish_reason))
    }

    fn supports_function_calling(&self) -> bool {
        true
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_provider() {
        let provider = OpenAiToolProvider::new("gpt-4o", "test-key");
        assert_eq!(provider.model_id, "gpt-4o");
        assert_eq!(provider.api_key, "test-key");
        assert!((provider.temperature - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn test_with_temperature() {
        let provider = OpenAiToolProvider::new("gpt-4o", "test-key").with_temperature(0.9);
        assert!((provider.temperature - 0.9).abs() < f32::EPSILON);
    }

    #[test]
    fn test_supports_function_calling() {
        let provider = OpenAiToolProvider::new("gpt-4o", "test-key");
        assert!(provider.supports_function_calling());
        assert_eq!(provider.provider_name(), "openai");
    }

    #[test]
    fn test_parse_tool_calls() {
        let tool_calls = vec![OpenAIToolCall {
            id: "call_abc123".to_string(),
            call_type: "function".to_string(),
            function: OpenAIFunctionCall {
                name: "search_google".to_string(),
                arguments: r#"{"query": "rust agents"}"#.to_string(),
            },
        }];

        let calls = OpenAiToolProvider::parse_tool_calls(&tool_calls).unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].id, "call_abc123");
        assert_eq!(calls[0].name, "search_google");
        assert_eq!(calls[0].arguments["query"], "rust agents");
    }

    #[test]
    fn test_parse_tool_calls_malformed_arguments() {
        let tool_calls = vec![OpenAIToolCall {
            id: "call_1".to_string(),
            call_type: "function".to_string(),
            function: OpenAIFunctionCall {
                name: "search_google".to_string(),
                arguments: "not json".to_string(),
            },
        }];

        let err = OpenAiToolProvider::parse_tool_calls(&tool_calls).unwrap_err();
        assert!(matches!(err, WorkforceError::InvalidToolArguments { .. }));
    }

    #[test]
    fn test_convert_finish_reason() {
        assert_eq!(OpenAiToolProvider::convert_finish_reason(Some("stop")), FinishReason::Stop);
        assert_eq!(
            OpenAiToolProvider::convert_finish_reason(Some("length")),
            FinishReason::Length
        );
        assert_eq!(OpenAiToolProvider::convert_finish_reason(None), FinishReason::Stop);
    }

    #[tokio::test]
    async fn test_turn_with_tool_calls() {
        let mut server = mockito::Server::new_async().await;
        let body = json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {"name": "search_google", "arguments": "{\"query\": \"rust\"}"}
                    }]
                },
                "finish_reason": "tool_calls"
            }]
        });
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let provider = OpenAiToolProvider::new("gpt-4o", "test-key").with_base_url(server.url());
        let messages = vec![ChatMessage::user("Find rust info")];
        let turn = provider.complete_with_tools(&messages, &[]).await.unwrap();

        assert!(turn.has_tool_calls());
        assert_eq!(turn.tool_calls[0].name, "search_google");
    }
}
