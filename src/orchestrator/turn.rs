//! Turn orchestrator - drives one user turn to a final answer.
//!
//! Each turn:
//! 1. Appends the user message
//! 2. Calls the model with the full history and tool catalog
//! 3. Appends the assistant reply; stops if it requests no tools
//! 4. Runs all requested tools concurrently and appends their results
//! 5. Goes back to step 2

use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};

use super::history::History;
use super::observer::{NoopObserver, TurnObserver};
use crate::error::{ChatError, Result};
use crate::llm::{CompletionRequest, FinishReason, LlmClient, Message, ToolCallRequest, Usage};
use crate::settings::Settings;
use crate::tools::{ToolExecutor, ToolRegistry};

/// Default system prompt for a session
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a helpful command-line assistant. Be concise and use the available tools when necessary.";

/// Where a turn currently is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnState {
    /// Waiting on the model client
    AwaitingModel,
    /// Running the tool calls from the last assistant message
    DispatchingTools(Vec<ToolCallRequest>),
    /// Finished with the final assistant text
    TurnComplete(String),
}

/// Configuration for the TurnOrchestrator.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    pub system_prompt: String,
    /// Tool rounds allowed per turn; `None` is unbounded
    pub max_rounds: Option<usize>,
    /// Bound on each individual tool call
    pub tool_timeout: Option<Duration>,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            max_rounds: None,
            tool_timeout: None,
        }
    }
}

/// Owns the conversation and runs turns against a model client.
pub struct TurnOrchestrator<L>
where
    L: LlmClient + ?Sized,
{
    client: Arc<L>,
    registry: Arc<ToolRegistry>,
    executor: ToolExecutor,
    observer: Arc<dyn TurnObserver>,
    history: History,
    settings: Settings,
    config: OrchestratorConfig,
    usage: Usage,
}

impl<L> TurnOrchestrator<L>
where
    L: LlmClient + ?Sized,
{
    pub fn new(client: Arc<L>, registry: Arc<ToolRegistry>, settings: Settings, config: OrchestratorConfig) -> Self {
        let observer: Arc<dyn TurnObserver> = Arc::new(NoopObserver);
        let executor = ToolExecutor::new(registry.clone())
            .with_observer(observer.clone())
            .with_timeout(config.tool_timeout);

        Self {
            client,
            registry,
            executor,
            observer,
            history: History::new(config.system_prompt.clone()),
            settings,
            config,
            usage: Usage::default(),
        }
    }

    /// Send tool and turn notifications to `observer`
    pub fn with_observer(mut self, observer: Arc<dyn TurnObserver>) -> Self {
        self.executor = ToolExecutor::new(self.registry.clone())
            .with_observer(observer.clone())
            .with_timeout(self.config.tool_timeout);
        self.observer = observer;
        self
    }

    /// Run one turn and return the final assistant text.
    ///
    /// On error, or if the returned future is dropped before completion,
    /// history is restored to what it was before the turn.
    pub async fn run_turn(&mut self, user_text: &str) -> Result<String> {
        info!("Starting turn with {} message(s) in history", self.history.len());

        let mut turn = TurnGuard::begin(&mut self.history);
        turn.append(Message::user(user_text))?;

        let mut state = TurnState::AwaitingModel;
        let mut rounds = 0usize;

        loop {
            state = match state {
                TurnState::AwaitingModel => {
                    let request = CompletionRequest::new(self.settings.model(), turn.snapshot().to_vec())
                        .with_tools(self.registry.all_descriptors())
                        .with_temperature(self.settings.temperature());

                    debug!("Calling model with {} message(s)", request.messages.len());
                    let response = self.client.complete(request).await?;
                    self.usage.add(&response.usage);
                    match response.finish_reason {
                        FinishReason::Length => warn!("Model reply was cut off at the token limit"),
                        FinishReason::ContentFilter => warn!("Model reply was withheld by the content filter"),
                        FinishReason::Stop | FinishReason::ToolCalls => {}
                    }

                    let reply = response.into_message();
                    let calls = reply.tool_calls().to_vec();
                    let text = reply.content().to_string();
                    // Appended before dispatch so every tool result has its request in history
                    turn.append(reply)?;

                    if calls.is_empty() {
                        TurnState::TurnComplete(text)
                    } else {
                        if let Some(limit) = self.config.max_rounds {
                            if rounds >= limit {
                                warn!("Model is still requesting tools after {} round(s)", limit);
                                return Err(ChatError::RoundLimitExceeded { limit });
                            }
                        }
                        rounds += 1;
                        TurnState::DispatchingTools(calls)
                    }
                }
                TurnState::DispatchingTools(calls) => {
                    debug!("Round {}: dispatching {} tool call(s)", rounds, calls.len());
                    let results = self.executor.execute_all(&calls).await;
                    for result in results {
                        turn.append(result)?;
                    }
                    TurnState::AwaitingModel
                }
                TurnState::TurnComplete(text) => {
                    turn.commit();
                    info!("Turn complete after {} tool round(s)", rounds);
                    self.observer.on_final_response(&text);
                    return Ok(text);
                }
            };
        }
    }

    /// Reset history to the system message. Only called between turns.
    pub fn clear(&mut self) {
        info!("Clearing conversation history");
        self.history.reset_to_system_only();
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Token usage accumulated across turns
    pub fn usage(&self) -> &Usage {
        &self.usage
    }
}

/// Rolls history back to the turn's starting point unless committed.
struct TurnGuard<'a> {
    history: &'a mut History,
    checkpoint: usize,
    committed: bool,
}

impl<'a> TurnGuard<'a> {
    fn begin(history: &'a mut History) -> Self {
        let checkpoint = history.checkpoint();
        Self {
            history,
            checkpoint,
            committed: false,
        }
    }

    fn commit(mut self) {
        self.committed = true;
    }
}

impl Deref for TurnGuard<'_> {
    type Target = History;

    fn deref(&self) -> &History {
        self.history
    }
}

impl DerefMut for TurnGuard<'_> {
    fn deref_mut(&mut self) -> &mut History {
        self.history
    }
}

impl Drop for TurnGuard<'_> {
    fn drop(&mut self) {
        if !self.committed {
            debug!("Discarding unfinished turn");
            self.history.rollback(self.checkpoint);
        }
    }
}
