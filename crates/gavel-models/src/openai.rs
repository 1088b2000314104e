//! OpenAI model implementation.
//!
//! This module provides an implementation of the `Model` trait for OpenAI's API.

use async_trait::async_trait;
use gavel_abstraction::{
    ChatMessage, Model, ModelError, ModelParameters, ModelResponse, ModelUsage,
};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use tracing::{debug, error};

/// OpenAI model implementation.
#[derive(Debug, Clone)]
pub struct OpenAIModel {
    /// The model ID (e.g., "gpt-4o").
    model_id: String,
    /// The API key for authentication.
    api_key: String,
    /// The base URL for the OpenAI API.
    base_url: String,
    /// HTTP client for making requests.
    client: Client,
}

impl OpenAIModel {
    /// Creates a new `OpenAIModel` with the given model ID.
    ///
    /// # Errors
    /// Returns a `ModelError` if the API key is not found in environment variables.
    pub fn new(model_id: String) -> Result<Self, ModelError> {
        let api_key = env::var("OPENAI_API_KEY").map_err(|_| {
            ModelError::UnsupportedModelProvider(
                "OPENAI_API_KEY environment variable not set".to_string(),
            )
        })?;

        Ok(Self {
            model_id,
            api_key,
            base_url: "https://api.openai.com/v1".to_string(),
            client: Client::new(),
        })
    }

    /// Creates a new `OpenAIModel` with a custom API key.
    #[must_use]
    pub fn with_api_key(model_id: String, api_key: String) -> Self {
        Self {
            model_id,
            api_key,
            base_url: "https://api.openai.com/v1".to_string(),
            client: Client::new(),
        }
    }

    /// Overrides the base URL (e.g., to point at a local test server).
    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

#[async_trait]
impl Model for OpenAIModel {
    async fn generate_chat_completion(
        &self,
        messages: &[ChatMessage],
        parameters: Option<ModelParameters>,
    ) -> Result<ModelResponse, ModelError> {
        debug!(
            model_id = %self.model_id,
            message_count = messages.len(),
            parameters = ?parameters,
            "OpenAIModel generating chat completion"
        );

        let url = format!("{}/chat/completions", self.base_url);

        let openai_messages: Vec<OpenAIMessage> = messages
            .iter()
            .map(|msg| OpenAIMessage { role: msg.role.clone(), content: msg.content.clone() })
            .collect();

        let mut request_body = OpenAIRequest {
            model: self.model_id.clone(),
            messages: openai_messages,
            temperature: None,
            top_p: None,
            max_tokens: None,
            stop: None,
        };

        if let Some(params) = parameters {
            request_body.temperature = params.temperature;
            request_body.top_p = params.top_p;
            request_body.max_tokens = params.max_tokens;
            request_body.stop = params.stop_sequences;
        }

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to send request to OpenAI API");
                ModelError::RequestError(format!("Network error: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            error!(
                status = %status,
                error = %error_text,
                "OpenAI API returned error status"
            );

            // 402 and 429 are hard stops: quota exhausted or rate limited.
            if status == 402 || status == 429 {
                return Err(ModelError::QuotaExceeded {
                    provider: "openai".to_string(),
                    message: Some(error_text),
                });
            }

            return Err(ModelError::ModelResponseError(format!(
                "API error ({}): {}",
                status, error_text
            )));
        }

        let openai_response: OpenAIResponse = response.json().await.map_err(|e| {
            error!(error = %e, "Failed to parse OpenAI API response");
            ModelError::SerializationError(format!("Failed to parse response: {}", e))
        })?;

        let content =
            openai_response.choices.first().map(|c| c.message.content.clone()).ok_or_else(
                || {
                    error!("No content in OpenAI API response");
                    ModelError::ModelResponseError("No content in API response".to_string())
                },
            )?;

        let usage = openai_response.usage.map(|u| ModelUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        Ok(ModelResponse { content, model_id: Some(self.model_id.clone()), usage })
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

// OpenAI API request/response structures

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAIMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
    usage: Option<OpenAIUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
}

#[derive(Debug, Deserialize)]
#[allow(clippy::struct_field_names)] // Matches API naming
struct OpenAIUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}
