//! Tool system for LLM interactions
//!
//! Tools are named capabilities the model can call. Each one publishes a
//! parameter schema and an async `execute`; the registry resolves them by name
//! and the executor runs a round of calls concurrently.

mod calculator;
mod executor;
mod file_system;
mod registry;
mod weather;

pub use calculator::CalculatorTool;
pub use executor::ToolExecutor;
pub use file_system::FileSystemTool;
pub use registry::ToolRegistry;
pub use weather::WeatherTool;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::llm::ToolDescriptor;

/// Parsed arguments of one tool call
pub type ToolArguments = Map<String, Value>;

/// A tool that can be called by the LLM
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name (matches the name the model calls)
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters
    fn parameters(&self) -> Value;

    /// Descriptor submitted to the model
    fn schema(&self) -> ToolDescriptor {
        ToolDescriptor::new(self.name(), self.description(), self.parameters())
    }

    /// Execute the tool.
    ///
    /// Domain failures are reported as text in `Ok`; `Err` is reserved for
    /// calls that do not match the schema.
    async fn execute(&self, arguments: &ToolArguments) -> Result<String, ToolError>;
}

/// Errors raised at a tool's boundary
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("missing required argument '{0}'")]
    MissingArgument(String),

    #[error("argument '{name}' is invalid: {reason}")]
    InvalidArgument { name: String, reason: String },
}

/// Fetch a required string argument
pub fn required_str<'a>(arguments: &'a ToolArguments, name: &str) -> Result<&'a str, ToolError> {
    optional_str(arguments, name)?.ok_or_else(|| ToolError::MissingArgument(name.to_string()))
}

/// Fetch an optional string argument; `null` counts as absent
pub fn optional_str<'a>(arguments: &'a ToolArguments, name: &str) -> Result<Option<&'a str>, ToolError> {
    match arguments.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(ToolError::InvalidArgument {
            name: name.to_string(),
            reason: format!("expected a string, got {}", other),
        }),
    }
}
