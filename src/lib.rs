//! toolchat - a conversational agent loop with tool calling
//!
//! A turn orchestrator mediates between the user, a chat-completions model
//! and a registry of async tools, running each round of tool calls
//! concurrently and feeding the results back until the model answers.

pub mod error;
pub mod llm;
pub mod orchestrator;
pub mod settings;
pub mod tools;

pub use error::{ChatError, Result};
pub use orchestrator::{History, OrchestratorConfig, TurnObserver, TurnOrchestrator};
pub use settings::Settings;
pub use tools::{Tool, ToolExecutor, ToolRegistry};
