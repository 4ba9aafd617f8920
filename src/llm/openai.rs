//! OpenAI-compatible chat-completions client
//!
//! This module implements the LlmClient trait against the `/chat/completions`
//! endpoint. Retries and rate-limit backoff are left to the caller.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{Value, json};

use crate::error::{ChatError, Result};
use crate::llm::client::LlmClient;
use crate::llm::types::{CompletionRequest, CompletionResponse, FinishReason, Message, ToolCallRequest, Usage};
use crate::settings::Settings;

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model to use
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Configuration for the OpenAI client
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(120),
        }
    }
}

impl OpenAiConfig {
    /// Create a new config with a specific model
    pub fn with_model(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// OpenAI API client
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    config: OpenAiConfig,
}

impl OpenAiClient {
    /// Create a client from validated session settings
    pub fn from_settings(settings: &Settings, config: OpenAiConfig) -> Result<Self> {
        let config = OpenAiConfig {
            model: settings.model().to_string(),
            ..config
        };
        Self::with_api_key(settings.api_key().to_string(), config)
    }

    /// Create a client with an explicit API key
    pub fn with_api_key(api_key: String, config: OpenAiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ChatError::Llm(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            config,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    /// Build the request body for the chat-completions API
    fn build_request(&self, request: &CompletionRequest) -> Value {
        let model = if request.model.is_empty() {
            self.config.model.as_str()
        } else {
            request.model.as_str()
        };

        let messages: Vec<Value> = request.messages.iter().map(message_to_wire).collect();

        let mut body = json!({
            "model": model,
            "messages": messages,
            "temperature": request.temperature
        });

        if !request.tools.is_empty() {
            let tools: Vec<Value> = request.tools.iter().map(|t| t.to_openai_schema()).collect();
            body["tools"] = json!(tools);
            body["tool_choice"] = json!("auto");
        }

        body
    }

    /// Parse the API response into a CompletionResponse
    fn parse_response(&self, body: Value) -> Result<CompletionResponse> {
        let choice = body["choices"]
            .get(0)
            .ok_or_else(|| ChatError::Llm("Response contained no choices".to_string()))?;

        let message = choice
            .get("message")
            .filter(|m| m.is_object())
            .ok_or_else(|| ChatError::Llm("Response choice has no message".to_string()))?;

        let finish_reason = FinishReason::from_wire(choice["finish_reason"].as_str());

        let usage = match body.get("usage") {
            Some(u) => Usage::new(
                u["prompt_tokens"].as_u64().unwrap_or(0),
                u["completion_tokens"].as_u64().unwrap_or(0),
            ),
            None => Usage::default(),
        };

        let content = message["content"].as_str().map(str::to_string);

        let mut tool_calls = Vec::new();
        if let Some(calls) = message["tool_calls"].as_array() {
            for call in calls {
                let id = call["id"]
                    .as_str()
                    .ok_or_else(|| ChatError::Llm("Tool call is missing an id".to_string()))?;
                let name = call["function"]["name"]
                    .as_str()
                    .ok_or_else(|| ChatError::Llm(format!("Tool call {} is missing a function name", id)))?;
                // Arguments stay serialized; a malformed payload is the executor's concern
                let arguments = match &call["function"]["arguments"] {
                    Value::String(s) => s.clone(),
                    Value::Null => String::new(),
                    other => other.to_string(),
                };
                tool_calls.push(ToolCallRequest::new(id, name, arguments));
            }
        }

        Ok(CompletionResponse {
            content,
            tool_calls,
            finish_reason,
            usage,
        })
    }

    /// Send a request to the API
    async fn send_request(&self, body: Value) -> Result<Value> {
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ChatError::Llm(format!("Request failed: {}", e)))?;

        let status = response.status();

        if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|h| h.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(60);
            return Err(ChatError::Api {
                status: 429,
                message: format!("Rate limited, retry after {} seconds", retry_after),
            });
        }

        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ChatError::Api {
                status: status.as_u16(),
                message: error_body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ChatError::Llm(format!("Failed to parse response: {}", e)))
    }
}

/// Map one history message onto the wire format
fn message_to_wire(message: &Message) -> Value {
    match message {
        Message::System { content } => json!({ "role": "system", "content": content }),
        Message::User { content } => json!({ "role": "user", "content": content }),
        Message::Assistant { content, tool_calls } => {
            if tool_calls.is_empty() {
                return json!({ "role": "assistant", "content": content });
            }
            let calls: Vec<Value> = tool_calls
                .iter()
                .map(|c| {
                    json!({
                        "id": c.id,
                        "type": "function",
                        "function": { "name": c.name, "arguments": c.arguments }
                    })
                })
                .collect();
            let content = if content.is_empty() { Value::Null } else { json!(content) };
            json!({ "role": "assistant", "content": content, "tool_calls": calls })
        }
        Message::Tool {
            tool_call_id,
            name,
            content,
        } => json!({
            "role": "tool",
            "tool_call_id": tool_call_id,
            "name": name,
            "content": content
        }),
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let body = self.build_request(&request);
        debug!(
            "POST {} ({} messages, {} tools)",
            self.endpoint(),
            request.messages.len(),
            request.tools.len()
        );
        let response = self.send_request(body).await?;
        self.parse_response(response)
    }
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("model", &self.config.model)
            .field("base_url", &self.config.base_url)
            .finish()
    }
}
