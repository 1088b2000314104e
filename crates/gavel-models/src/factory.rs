//! Model factory for creating model instances from configuration.
//!
//! This module provides functionality to create model instances based on configuration,
//! handling API key loading from environment variables.

use crate::{MockModel, OpenAIModel};
use gavel_abstraction::{Model, ModelError};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, error};

/// Model type enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelType {
    /// Mock model for testing.
    Mock,
    /// OpenAI model.
    OpenAI,
}

impl FromStr for ModelType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mock" => Ok(Self::Mock),
            "openai" => Ok(Self::OpenAI),
            _ => Err(()),
        }
    }
}

/// Model configuration.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// The type of model to create.
    pub model_type: ModelType,
    /// The model ID (e.g., "gpt-4o").
    pub model_id: String,
    /// Optional API key (if not provided, will be loaded from environment).
    pub api_key: Option<String>,
    /// Optional base URL override (used by tests against a local server).
    pub base_url: Option<String>,
}

impl ModelConfig {
    /// Creates a new `ModelConfig` with the given type and model ID.
    #[must_use]
    pub fn new(model_type: ModelType, model_id: String) -> Self {
        Self { model_type, model_id, api_key: None, base_url: None }
    }

    /// Sets the API key for this configuration.
    #[must_use]
    pub fn with_api_key(mut self, api_key: String) -> Self {
        self.api_key = Some(api_key);
        self
    }

    /// Sets the base URL override for this configuration.
    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = Some(base_url);
        self
    }
}

/// Factory for creating model instances.
pub struct ModelFactory;

impl ModelFactory {
    /// Creates a model instance from the given configuration.
    ///
    /// # Errors
    /// Returns a `ModelError` if model creation fails (e.g., missing API key).
    pub fn create(config: ModelConfig) -> Result<Arc<dyn Model + Send + Sync>, ModelError> {
        debug!(
            model_type = ?config.model_type,
            model_id = %config.model_id,
            "Creating model instance"
        );

        match config.model_type {
            ModelType::Mock => {
                let model = MockModel::new(config.model_id);
                Ok(Arc::new(model))
            }
            ModelType::OpenAI => {
                let mut model = if let Some(api_key) = config.api_key {
                    OpenAIModel::with_api_key(config.model_id, api_key)
                } else {
                    OpenAIModel::new(config.model_id)?
                };
                if let Some(base_url) = config.base_url {
                    model = model.with_base_url(base_url);
                }
                Ok(Arc::new(model))
            }
        }
    }

    /// Creates a model instance from a model type string and model ID.
    ///
    /// # Errors
    /// Returns a `ModelError` if the model type is unrecognized or creation fails.
    pub fn create_from_str(
        model_type_str: &str,
        model_id: String,
    ) -> Result<Arc<dyn Model + Send + Sync>, ModelError> {
        let model_type = ModelType::from_str(model_type_str).map_err(|()| {
            error!(model_type = %model_type_str, "Unrecognized model type");
            ModelError::UnsupportedModelProvider(format!(
                "Unrecognized model type: {}",
                model_type_str
            ))
        })?;

        let config = ModelConfig::new(model_type, model_id);
        Self::create(config)
    }
}
