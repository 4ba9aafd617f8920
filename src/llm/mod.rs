//! LLM Client Layer - chat-completions integration
//!
//! This module provides:
//! - Message types for LLM communication
//! - LlmClient trait for API abstraction
//! - OpenAiClient implementation
//! - MockLlmClient for tests

pub mod client;
pub mod openai;
pub mod types;

pub use client::{LlmClient, MockLlmClient};
pub use openai::{OpenAiClient, OpenAiConfig};
pub use types::{
    CompletionRequest, CompletionResponse, FinishReason, Message, Role, ToolCallRequest, ToolDescriptor, Usage,
};
