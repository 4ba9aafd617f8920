//! Tool executor - runs one round of tool calls concurrently
//!
//! Every request yields exactly one tool message carrying the request's id.
//! Failures (bad arguments, unknown tool, tool error, panic, timeout) become
//! in-band text so the model can react to them on the next round.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use futures::future::join_all;
use log::{debug, warn};
use serde_json::Value;

use super::{Tool, ToolArguments, ToolRegistry};
use crate::llm::{Message, ToolCallRequest};
use crate::orchestrator::{NoopObserver, TurnObserver};

/// Dispatches tool calls through a registry
pub struct ToolExecutor {
    registry: Arc<ToolRegistry>,
    observer: Arc<dyn TurnObserver>,
    timeout: Option<Duration>,
}

impl ToolExecutor {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self {
            registry,
            observer: Arc::new(NoopObserver),
            timeout: None,
        }
    }

    /// Report tool calls and results to `observer`
    pub fn with_observer(mut self, observer: Arc<dyn TurnObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Bound each individual tool call
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Execute every call concurrently; results come back in request order.
    pub async fn execute_all(&self, calls: &[ToolCallRequest]) -> Vec<Message> {
        debug!("Dispatching {} tool call(s)", calls.len());
        join_all(calls.iter().map(|call| self.execute(call))).await
    }

    /// Execute a single call and wrap the outcome as a tool message
    pub async fn execute(&self, call: &ToolCallRequest) -> Message {
        let content = self.outcome(call).await;
        self.observer.on_tool_call_finished(&call.name, &content);
        Message::tool(call.id.clone(), call.name.clone(), content)
    }

    async fn outcome(&self, call: &ToolCallRequest) -> String {
        let Some(arguments) = parse_arguments(&call.arguments) else {
            warn!("Tool call {} ({}) has malformed arguments", call.id, call.name);
            return format!("Error: Invalid arguments format for {}.", call.name);
        };

        self.observer.on_tool_call_started(&call.name, &arguments);

        let Some(tool) = self.registry.lookup(&call.name) else {
            warn!("Model requested unknown tool {}", call.name);
            return format!("Error: Tool '{}' not found.", call.name);
        };

        self.run_tool(tool, call, &arguments).await
    }

    async fn run_tool(&self, tool: &dyn Tool, call: &ToolCallRequest, arguments: &ToolArguments) -> String {
        let guarded = AssertUnwindSafe(tool.execute(arguments)).catch_unwind();

        let finished = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, guarded).await {
                Ok(finished) => finished,
                Err(_) => {
                    warn!("Tool {} timed out after {}ms", call.name, limit.as_millis());
                    return format!(
                        "Error executing tool {}: timed out after {}ms",
                        call.name,
                        limit.as_millis()
                    );
                }
            },
            None => guarded.await,
        };

        match finished {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                warn!("Tool {} failed: {}", call.name, e);
                format!("Error executing tool {}: {}", call.name, e)
            }
            Err(_) => {
                warn!("Tool {} panicked", call.name);
                format!("Error executing tool {}: tool panicked", call.name)
            }
        }
    }
}

/// Parse a serialized argument payload. Only a JSON object is accepted.
pub fn parse_arguments(raw: &str) -> Option<ToolArguments> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}
