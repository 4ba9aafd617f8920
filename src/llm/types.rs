//! LLM types for chat-completion communication
//!
//! This module defines the conversation messages, tool-call requests and
//! tool descriptors exchanged with the model client.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Role of a message in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

/// A message in the conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Message {
    System {
        content: String,
    },
    User {
        content: String,
    },
    Assistant {
        content: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        tool_calls: Vec<ToolCallRequest>,
    },
    Tool {
        tool_call_id: String,
        name: String,
        content: String,
    },
}

impl Message {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Message::System {
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Message::User {
            content: content.into(),
        }
    }

    /// Create an assistant message with no tool calls
    pub fn assistant(content: impl Into<String>) -> Self {
        Message::Assistant {
            content: content.into(),
            tool_calls: Vec::new(),
        }
    }

    /// Create an assistant message carrying tool-call requests
    pub fn assistant_with_tools(content: impl Into<String>, tool_calls: Vec<ToolCallRequest>) -> Self {
        Message::Assistant {
            content: content.into(),
            tool_calls,
        }
    }

    /// Create a tool result message answering `tool_call_id`
    pub fn tool(tool_call_id: impl Into<String>, name: impl Into<String>, content: impl Into<String>) -> Self {
        Message::Tool {
            tool_call_id: tool_call_id.into(),
            name: name.into(),
            content: content.into(),
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Message::System { .. } => Role::System,
            Message::User { .. } => Role::User,
            Message::Assistant { .. } => Role::Assistant,
            Message::Tool { .. } => Role::Tool,
        }
    }

    /// Text content (possibly empty)
    pub fn content(&self) -> &str {
        match self {
            Message::System { content }
            | Message::User { content }
            | Message::Assistant { content, .. }
            | Message::Tool { content, .. } => content,
        }
    }

    /// Tool-call requests carried by an assistant message; empty for other roles
    pub fn tool_calls(&self) -> &[ToolCallRequest] {
        match self {
            Message::Assistant { tool_calls, .. } => tool_calls,
            _ => &[],
        }
    }
}

/// A tool invocation requested by the model
///
/// `arguments` is kept in its serialized form; the executor parses it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCallRequest {
    pub id: String,
    pub name: String,
    pub arguments: String,
}

impl ToolCallRequest {
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments: arguments.into(),
        }
    }
}

/// Tool descriptor submitted to the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

impl ToolDescriptor {
    pub fn new(name: impl Into<String>, description: impl Into<String>, parameters: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }

    /// Convert to the chat-completions function schema format
    pub fn to_openai_schema(&self) -> Value {
        serde_json::json!({
            "type": "function",
            "function": {
                "name": self.name,
                "description": self.description,
                "parameters": self.parameters
            }
        })
    }
}

/// Request to the LLM for completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolDescriptor>,
    pub temperature: f64,
}

impl CompletionRequest {
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            tools: Vec::new(),
            temperature: 0.7,
        }
    }

    /// Add tools to the request
    pub fn with_tools(mut self, tools: Vec<ToolDescriptor>) -> Self {
        self.tools = tools;
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Response from the LLM
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub content: Option<String>,
    pub tool_calls: Vec<ToolCallRequest>,
    pub finish_reason: FinishReason,
    pub usage: Usage,
}

impl CompletionResponse {
    /// A final text answer
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Default::default()
        }
    }

    /// A response that only requests tools
    pub fn tool_calls(tool_calls: Vec<ToolCallRequest>) -> Self {
        Self {
            content: None,
            tool_calls,
            finish_reason: FinishReason::ToolCalls,
            usage: Usage::default(),
        }
    }

    /// Convert into the assistant message appended to history
    pub fn into_message(self) -> Message {
        Message::assistant_with_tools(self.content.unwrap_or_default(), self.tool_calls)
    }
}

/// Reason why the LLM stopped generating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    #[default]
    Stop,
    ToolCalls,
    Length,
    ContentFilter,
}

impl FinishReason {
    pub fn from_wire(value: Option<&str>) -> Self {
        match value {
            Some("tool_calls") | Some("function_call") => FinishReason::ToolCalls,
            Some("length") => FinishReason::Length,
            Some("content_filter") => FinishReason::ContentFilter,
            _ => FinishReason::Stop,
        }
    }
}

/// Token usage statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
}

impl Usage {
    pub fn new(prompt_tokens: u64, completion_tokens: u64) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
        }
    }

    /// Calculate total tokens
    pub fn total(&self) -> u64 {
        self.prompt_tokens + self.completion_tokens
    }

    /// Accumulate usage from another instance
    pub fn add(&mut self, other: &Usage) {
        self.prompt_tokens += other.prompt_tokens;
        self.completion_tokens += other.completion_tokens;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::Tool).unwrap(), "\"tool\"");
        assert_eq!(serde_json::to_string(&Role::System).unwrap(), "\"system\"");
    }

    #[test]
    fn test_message_constructors() {
        assert_eq!(Message::system("be brief").role(), Role::System);
        assert_eq!(Message::user("hi").content(), "hi");

        let msg = Message::tool("call_1", "calculate", "42");
        assert_eq!(msg.role(), Role::Tool);
        assert_eq!(msg.content(), "42");
        assert!(msg.tool_calls().is_empty());
    }

    #[test]
    fn test_assistant_tool_calls() {
        let call = ToolCallRequest::new("call_1", "get_weather", r#"{"location":"Paris"}"#);
        let msg = Message::assistant_with_tools("", vec![call.clone()]);
        assert_eq!(msg.content(), "");
        assert_eq!(msg.tool_calls(), &[call]);
    }

    #[test]
    fn test_message_serialization_is_role_tagged() {
        let json = serde_json::to_value(Message::tool("call_9", "list_files", "ok")).unwrap();
        assert_eq!(json["role"], "tool");
        assert_eq!(json["tool_call_id"], "call_9");
        assert_eq!(json["name"], "list_files");

        let json = serde_json::to_value(Message::assistant("done")).unwrap();
        assert_eq!(json["role"], "assistant");
        assert!(json.get("tool_calls").is_none());
    }

    #[test]
    fn test_descriptor_to_openai_schema() {
        let descriptor = ToolDescriptor::new(
            "list_files",
            "Lists files",
            serde_json::json!({"type": "object", "properties": {}, "required": []}),
        );
        let schema = descriptor.to_openai_schema();
        assert_eq!(schema["type"], "function");
        assert_eq!(schema["function"]["name"], "list_files");
        assert!(schema["function"]["parameters"].is_object());
    }

    #[test]
    fn test_completion_request_defaults() {
        let req = CompletionRequest::new("gpt-4o-mini", vec![Message::user("hi")]).with_temperature(0.2);
        assert!(req.tools.is_empty());
        assert!((req.temperature - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_response_into_message_defaults_to_empty_text() {
        let call = ToolCallRequest::new("a", "calculate", "{}");
        let msg = CompletionResponse::tool_calls(vec![call]).into_message();
        assert_eq!(msg.content(), "");
        assert_eq!(msg.tool_calls().len(), 1);
    }

    #[test]
    fn test_finish_reason_from_wire() {
        assert_eq!(FinishReason::from_wire(Some("tool_calls")), FinishReason::ToolCalls);
        assert_eq!(FinishReason::from_wire(Some("length")), FinishReason::Length);
        assert_eq!(FinishReason::from_wire(None), FinishReason::Stop);
    }

    #[test]
    fn test_usage_add() {
        let mut usage = Usage::new(100, 50);
        usage.add(&Usage::new(200, 100));
        assert_eq!(usage.prompt_tokens, 300);
        assert_eq!(usage.completion_tokens, 150);
        assert_eq!(usage.total(), 450);
    }
}
