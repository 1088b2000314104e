//! Panel configuration.
//!
//! Configuration is an explicit struct constructed once at process start and
//! passed by reference into every agent-construction call. Nothing here is
//! read lazily at import time.

use gavel_abstraction::{Model, ModelError};
use gavel_models::{ModelConfig, ModelFactory, ModelType};
use gavel_workforce::{OpenAiToolProvider, PromptToolProvider, ToolCallProvider, WorkforceError};
use std::env;
use std::sync::Arc;
use tracing::debug;

/// Configuration for the judge panel.
#[derive(Debug, Clone)]
pub struct PanelConfig {
    /// Model provider for all agents.
    pub model_type: ModelType,
    /// Model ID for all agents (e.g., "gpt-4o").
    pub model_id: String,
    /// Optional API key; falls back to the provider's environment variable.
    pub api_key: Option<String>,
}

impl PanelConfig {
    /// Creates a configuration with the given model type and ID.
    #[must_use]
    pub fn new(model_type: ModelType, model_id: impl Into<String>) -> Self {
        Self { model_type, model_id: model_id.into(), api_key: None }
    }

    /// Sets an explicit API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Builds a configuration from `GAVEL_MODEL_TYPE` and `GAVEL_MODEL_ID`,
    /// defaulting to OpenAI's gpt-4o.
    #[must_use]
    pub fn from_env() -> Self {
        let model_type = env::var("GAVEL_MODEL_TYPE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(ModelType::OpenAI);
        let model_id =
            env::var("GAVEL_MODEL_ID").unwrap_or_else(|_| "gpt-4o".to_string());

        debug!(model_type = ?model_type, model_id = %model_id, "Panel config from environment");
        Self { model_type, model_id, api_key: None }
    }

    /// Creates a fresh model instance for one agent.
    ///
    /// # Errors
    /// Returns a `ModelError` if the provider cannot be constructed.
    pub fn create_model(&self) -> Result<Arc<dyn Model + Send + Sync>, ModelError> {
        let mut config = ModelConfig::new(self.model_type, self.model_id.clone());
        if let Some(api_key) = &self.api_key {
            config = config.with_api_key(api_key.clone());
        }
        ModelFactory::create(config)
    }

    /// Creates the tool-calling provider used by the research agent.
    ///
    /// OpenAI gets native function calling; everything else runs through the
    /// prompt-based provider over a plain model.
    ///
    /// # Errors
    /// Returns a `WorkforceError` if the provider cannot be constructed.
    pub fn create_tool_provider(&self) -> Result<Arc<dyn ToolCallProvider>, WorkforceError> {
        match self.model_type {
            ModelType::OpenAI => {
                let provider = if let Some(api_key) = &self.api_key {
                    OpenAiToolProvider::new(self.model_id.clone(), api_key.clone())
                } else {
                    OpenAiToolProvider::from_env(self.model_id.clone())?
                };
                Ok(Arc::new(provider))
            }
            ModelType::Mock => {
                let model = self.create_model()?;
                Ok(Arc::new(PromptToolProvider::new(model)))
            }
        }
    }
}
