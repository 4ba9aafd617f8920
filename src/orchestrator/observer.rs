//! Presentation hooks fired during a turn
//!
//! Observers are injected rather than global so the orchestrator can run
//! without a terminal. They must not block and cannot alter the turn.

use crate::tools::ToolArguments;

/// Receives turn notifications. Every method defaults to a no-op.
pub trait TurnObserver: Send + Sync {
    /// A tool is about to run with the parsed `arguments`
    fn on_tool_call_started(&self, _name: &str, _arguments: &ToolArguments) {}

    /// A tool call produced `result` (success or error text)
    fn on_tool_call_finished(&self, _name: &str, _result: &str) {}

    /// The turn finished with `text`
    fn on_final_response(&self, _text: &str) {}

    /// A turn failed
    fn on_error(&self, _message: &str) {}
}

/// Observer that ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl TurnObserver for NoopObserver {}
