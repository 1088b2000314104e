// Tool abstractions for workforce agents
//
// Tools represent callable actions an agent can take (e.g., web searches).
// This module defines the tool interface and parameter structures.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::Result;

pub mod search;

pub use search::{DuckDuckGoTool, GoogleSearchTool};

/// Tool call requested by a model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Unique ID for this tool call
    pub id: String,
    /// Name of the tool to invoke
    pub name: String,
    /// Arguments for the tool
    pub arguments: Value,
}

/// Tool parameters schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolParameters {
    /// Type (always "object" for function parameters)
    #[serde(rename = "type")]
    pub param_type: String,
    /// Property definitions
    pub properties: HashMap<String, ToolPropertySchema>,
    /// Required property names
    pub required: Vec<String>,
}

impl ToolParameters {
    /// Create a new tool parameters schema
    pub fn new() -> Self {
        Self { param_type: "object".to_string(), properties: HashMap::new(), required: Vec::new() }
    }

    /// Add a property to the schema
    #[must_use]
    pub fn add_property(
        mut self,
        name: impl Into<String>,
        property_type: impl Into<String>,
        description: impl Into<String>,
        required: bool,
    ) -> Self {
        let name = name.into();
        self.properties.insert(
            name.clone(),
            ToolPropertySchema {
                property_type: property_type.into(),
                description: description.into(),
            },
        );
        if required {
            self.required.push(name);
        }
        self
    }
}

impl Default for ToolParameters {
    fn default() -> Self {
        Self::new()
    }
}

/// Tool property schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolPropertySchema {
    /// Property type
    #[serde(rename = "type")]
    pub property_type: String,
    /// Property description
    pub description: String,
}

/// Arguments passed to a tool handler
#[derive(Debug, Clone)]
pub struct ToolArguments {
    /// Parsed arguments as JSON value
    pub args: Value,
}

impl ToolArguments {
    /// Create new tool arguments
    pub fn new(args: Value) -> Self {
        Self { args }
    }

    /// Get argument as string
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.args.get(key)?.as_str().map(str::to_string)
    }

    /// Get argument as i64
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.args.get(key)?.as_i64()
    }
}

/// Result from tool execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Whether execution succeeded
    pub success: bool,
    /// Output from the tool
    pub output: String,
}

impl ToolResult {
    /// Create a successful result
    pub fn success(output: impl Into<String>) -> Self {
        Self { success: true, output: output.into() }
    }

    /// Create an error result
    ///
    /// Error results are fed back to the model rather than aborting the run.
    pub fn error(output: impl Into<String>) -> Self {
        Self { success: false, output: output.into() }
    }
}

/// Handler for tool execution
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Execute the tool with given arguments
    async fn execute(&self, args: &ToolArguments) -> Result<ToolResult>;
}

/// Tool definition
#[derive(Clone)]
pub struct Tool {
    /// Tool name (used in function calls)
    pub name: String,
    /// Tool description
    pub description: String,
    /// Parameter schema
    pub parameters: ToolParameters,
    /// Handler for executing the tool
    pub handler: Arc<dyn ToolHandler>,
}

impl Tool {
    /// Create a new tool
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: ToolParameters,
        handler: Arc<dyn ToolHandler>,
    ) -> Self {
        Self { name: name.into(), description: description.into(), parameters, handler }
    }

    /// Execute this tool with given arguments
    pub async fn execute(&self, args: &ToolArguments) -> Result<ToolResult> {
        self.handler.execute(args).await
    }
}

// Implement Debug manually since Arc<dyn ToolHandler> doesn't implement Debug
impl std::fmt::Debug for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tool")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("parameters", &self.parameters)
            .field("handler", &"<handler>")
            .finish()
    }
}
