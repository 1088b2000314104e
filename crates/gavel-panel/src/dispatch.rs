//! Entry dispatcher.
//!
//! Incoming run requests name a pipeline by function name. Dispatch goes
//! through an explicit, closed registry: every invocable handler and its
//! expected input schema (if any) is declared at registration time. There is
//! no reflection and no runtime fallback for unknown schema tags.

use crate::config::PanelConfig;
use crate::pipeline::judge_panel;
use futures::future::BoxFuture;
use gavel_abstraction::ModelError;
use gavel_workforce::WorkforceError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Dispatch errors
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The run request payload is malformed
    #[error("Invalid run request: {0}")]
    Validation(String),

    /// The requested function is not registered
    #[error("Function '{name}' not found")]
    FunctionNotFound {
        /// The function name requested by the caller
        name: String,
    },

    /// The requested input schema tag is not in the closed set
    #[error("Unknown input schema: {tag}")]
    UnknownSchema {
        /// The schema tag requested by the caller
        tag: String,
    },

    /// Model error
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// Workforce error
    #[error("Workforce error: {0}")]
    Workforce(#[from] WorkforceError),
}

/// An incoming run request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRequest {
    /// Pipeline selection and arguments.
    pub inputs: InputSchema,
    /// Deployment metadata; passed through, not interpreted.
    #[serde(default)]
    pub deployment: Option<Value>,
    /// Consumer identity; passed through, not interpreted.
    #[serde(default)]
    pub consumer_id: Option<String>,
    /// Request signature; passed through, not verified here.
    #[serde(default)]
    pub signature: Option<String>,
}

/// Pipeline selection and arguments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputSchema {
    /// Name of the pipeline to invoke.
    pub func_name: String,
    /// Optional schema tag for the generic dispatch path.
    #[serde(default)]
    pub input_type: Option<String>,
    /// Raw arguments for the generic dispatch path.
    #[serde(default)]
    pub func_input_data: Option<Value>,
}

/// Input to the evaluation pipeline, parsed from `func_input_data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationInput {
    /// Description of the project to evaluate.
    pub description: String,
    /// Optional expected output description.
    #[serde(default)]
    pub expected_output: Option<String>,
}

/// The closed set of known input schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaTag {
    /// [`EvaluationInput`]
    Evaluation,
}

impl FromStr for SchemaTag {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "evaluation" | "EvaluationInput" => Ok(Self::Evaluation),
            _ => Err(()),
        }
    }
}

impl SchemaTag {
    /// Parses raw input data through this schema.
    ///
    /// # Errors
    /// Returns a validation error if the data does not match the schema.
    pub fn parse_input(self, data: Value) -> Result<PipelineInput, DispatchError> {
        match self {
            Self::Evaluation => serde_json::from_value(data)
                .map(PipelineInput::Evaluation)
                .map_err(|e| DispatchError::Validation(format!("Invalid evaluation input: {e}"))),
        }
    }
}

/// Typed-or-raw input handed to a `WithInput` handler.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineInput {
    /// Input parsed through [`SchemaTag::Evaluation`].
    Evaluation(EvaluationInput),
    /// Raw mapping, used when no schema is declared or requested.
    Raw(Value),
}

type NoArgsFn = Box<dyn Fn() -> BoxFuture<'static, Result<String, DispatchError>> + Send + Sync>;
type WithInputFn =
    Box<dyn Fn(PipelineInput) -> BoxFuture<'static, Result<String, DispatchError>> + Send + Sync>;

/// An invocable pipeline handler.
pub enum PipelineHandler {
    /// Handler invoked with no arguments; all other input fields are ignored.
    NoArgs(NoArgsFn),
    /// Handler invoked with a single input, optionally parsed through a
    /// declared schema.
    WithInput {
        /// Schema the handler expects its input parsed through, if any.
        schema: Option<SchemaTag>,
        /// The handler itself.
        handler: WithInputFn,
    },
}

impl std::fmt::Debug for PipelineHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoArgs(_) => f.write_str("NoArgs"),
            Self::WithInput { schema, .. } => {
                f.debug_struct("WithInput").field("schema", schema).finish_non_exhaustive()
            }
        }
    }
}

/// Closed registry mapping pipeline names to handlers.
#[derive(Debug, Default)]
pub struct PipelineRegistry {
    pipelines: Vec<(String, PipelineHandler)>,
}

impl PipelineRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { pipelines: Vec::new() }
    }

    /// Creates the registry of shipped pipelines: exactly `judge_agent`.
    ///
    /// The configuration is captured once here and passed into every agent
    /// construction; no pipeline reads process-wide state at dispatch time.
    #[must_use]
    pub fn with_default_pipelines(config: PanelConfig) -> Self {
        let mut registry = Self::new();
        let config = Arc::new(config);
        registry.register_no_args("judge_agent", move || {
            let config = Arc::clone(&config);
            async move { judge_panel(&config).await }
        });
        registry
    }

    /// Registers a zero-argument handler.
    pub fn register_no_args<F, Fut>(&mut self, name: impl Into<String>, f: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String, DispatchError>> + Send + 'static,
    {
        let name = name.into();
        debug!(pipeline = %name, "Registering zero-argument pipeline");
        self.pipelines
            .push((name, PipelineHandler::NoArgs(Box::new(move || Box::pin(f())))));
    }

    /// Registers a single-argument handler with an optional declared schema.
    pub fn register_with_input<F, Fut>(
        &mut self,
        name: impl Into<String>,
        schema: Option<SchemaTag>,
        f: F,
    ) where
        F: Fn(PipelineInput) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String, DispatchError>> + Send + 'static,
    {
        let name = name.into();
        debug!(pipeline = %name, schema = ?schema, "Registering pipeline");
        self.pipelines.push((
            name,
            PipelineHandler::WithInput {
                schema,
                handler: Box::new(move |input| Box::pin(f(input))),
            },
        ));
    }

    /// Checks whether a pipeline is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns registered pipeline names.
    pub fn pipeline_names(&self) -> Vec<&str> {
        self.pipelines.iter().map(|(name, _)| name.as_str()).collect()
    }

    fn get(&self, name: &str) -> Option<&PipelineHandler> {
        self.pipelines.iter().find(|(n, _)| n == name).map(|(_, h)| h)
    }
}

/// Dispatches a raw run-request payload to a registered pipeline.
///
/// # Errors
/// Returns `Validation` on a malformed payload, `FunctionNotFound` for an
/// unregistered function name, `UnknownSchema` for a schema tag outside the
/// closed set, and propagates pipeline failures unmodified.
pub async fn run(registry: &PipelineRegistry, payload: Value) -> Result<String, DispatchError> {
    let request: RunRequest = serde_json::from_value(payload)
        .map_err(|e| DispatchError::Validation(format!("Malformed run request: {e}")))?;

    debug!(
        consumer_id = request.consumer_id.as_deref().unwrap_or("-"),
        has_deployment = request.deployment.is_some(),
        has_signature = request.signature.is_some(),
        "Run request accepted"
    );

    let InputSchema { func_name, input_type, func_input_data } = request.inputs;

    let handler = registry
        .get(&func_name)
        .ok_or_else(|| DispatchError::FunctionNotFound { name: func_name.clone() })?;

    info!(func_name = %func_name, "Dispatching pipeline");

    match handler {
        PipelineHandler::NoArgs(f) => f().await,
        PipelineHandler::WithInput { schema, handler } => {
            // A request-named tag must come from the closed set, even when
            // the handler declares its own schema.
            let requested = input_type
                .map(|tag| {
                    SchemaTag::from_str(&tag)
                        .map_err(|()| DispatchError::UnknownSchema { tag })
                })
                .transpose()?;

            let data = func_input_data.unwrap_or(Value::Null);
            let input = match schema.or(requested) {
                Some(tag) => tag.parse_input(data)?,
                None => PipelineInput::Raw(data),
            };

            handler(input).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(func_name: &str) -> Value {
        json!({
            "inputs": {"func_name": func_name},
            "deployment": {"node": "local"},
            "consumer_id": "consumer-1",
            "signature": "sig"
        })
    }

    #[tokio::test]
    async fn test_no_args_dispatch_returns_sentinel() {
        let mut registry = PipelineRegistry::new();
        registry.register_no_args("judge_agent", || async { Ok("SENTINEL".to_string()) });

        // Extra input fields must be ignored on the zero-argument path.
        let payload = json!({
            "inputs": {
                "func_name": "judge_agent",
                "input_type": "evaluation",
                "func_input_data": {"description": "ignored"}
            },
            "consumer_id": "consumer-1"
        });

        let result = run(&registry, payload).await.unwrap();
        assert_eq!(result, "SENTINEL");
    }

    #[tokio::test]
    async fn test_unknown_function_names_the_function() {
        let registry = PipelineRegistry::new();
        let err = run(&registry, payload("nonexistent_fn")).await.unwrap_err();
        assert!(err.to_string().contains("nonexistent_fn"));
        assert!(matches!(err, DispatchError::FunctionNotFound { .. }));
    }

    #[tokio::test]
    async fn test_malformed_payload_is_validation_error() {
        let registry = PipelineRegistry::new();
        let err = run(&registry, json!({"no_inputs": true})).await.unwrap_err();
        assert!(matches!(err, DispatchError::Validation(_)));
    }

    #[tokio::test]
    async fn test_with_input_declared_schema_parses_data() {
        let mut registry = PipelineRegistry::new();
        registry.register_with_input("evaluate", Some(SchemaTag::Evaluation), |input| async move {
            match input {
                PipelineInput::Evaluation(eval) => Ok(eval.description),
                PipelineInput::Raw(_) => Ok("raw".to_string()),
            }
        });

        let payload = json!({
            "inputs": {
                "func_name": "evaluate",
                "func_input_data": {"description": "A widget", "expected_output": "a report"}
            }
        });

        let result = run(&registry, payload).await.unwrap();
        assert_eq!(result, "A widget");
    }

    #[tokio::test]
    async fn test_with_input_no_schema_passes_raw_mapping() {
        let mut registry = PipelineRegistry::new();
        registry.register_with_input("raw_fn", None, |input| async move {
            match input {
                PipelineInput::Raw(value) => Ok(value.to_string()),
                PipelineInput::Evaluation(_) => Ok("typed".to_string()),
            }
        });

        let payload = json!({
            "inputs": {"func_name": "raw_fn", "func_input_data": {"k": "v"}}
        });

        let result = run(&registry, payload).await.unwrap();
        assert_eq!(result, r#"{"k":"v"}"#);
    }

    #[tokio::test]
    async fn test_request_named_schema_parses_data() {
        let mut registry = PipelineRegistry::new();
        registry.register_with_input("evaluate", None, |input| async move {
            match input {
                PipelineInput::Evaluation(eval) => Ok(eval.description),
                PipelineInput::Raw(_) => Ok("raw".to_string()),
            }
        });

        let payload = json!({
            "inputs": {
                "func_name": "evaluate",
                "input_type": "evaluation",
                "func_input_data": {"description": "A widget"}
            }
        });

        let result = run(&registry, payload).await.unwrap();
        assert_eq!(result, "A widget");
    }

    #[tokio::test]
    async fn test_unknown_schema_tag_is_rejected() {
        let mut registry = PipelineRegistry::new();
        registry.register_with_input("evaluate", None, |_| async { Ok("ok".to_string()) });

        let payload = json!({
            "inputs": {
                "func_name": "evaluate",
                "input_type": "mystery_schema",
                "func_input_data": {}
            }
        });

        let err = run(&registry, payload).await.unwrap_err();
        match err {
            DispatchError::UnknownSchema { tag } => assert_eq!(tag, "mystery_schema"),
            other => panic!("Expected UnknownSchema, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_schema_mismatch_is_validation_error() {
        let mut registry = PipelineRegistry::new();
        registry.register_with_input("evaluate", Some(SchemaTag::Evaluation), |_| async {
            Ok("ok".to_string())
        });

        let payload = json!({
            "inputs": {
                "func_name": "evaluate",
                "func_input_data": {"not_description": 42}
            }
        });

        let err = run(&registry, payload).await.unwrap_err();
        assert!(matches!(err, DispatchError::Validation(_)));
    }

    #[test]
    fn test_schema_tag_from_str() {
        assert_eq!(SchemaTag::from_str("evaluation"), Ok(SchemaTag::Evaluation));
        assert_eq!(SchemaTag::from_str("EvaluationInput"), Ok(SchemaTag::Evaluation));
        assert_eq!(SchemaTag::from_str("unknown"), Err(()));
    }

    #[test]
    fn test_registry_names() {
        let mut registry = PipelineRegistry::new();
        registry.register_no_args("a", || async { Ok(String::new()) });
        registry.register_with_input("b", None, |_| async { Ok(String::new()) });

        assert!(registry.contains("a"));
        assert!(!registry.contains("c"));
        assert_eq!(registry.pipeline_names(), vec!["a", "b"]);
    }
}
