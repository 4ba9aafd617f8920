//! Turn orchestration - conversation history, observers and the turn loop

mod history;
mod observer;
mod turn;

pub use history::History;
pub use observer::{NoopObserver, TurnObserver};
pub use turn::{DEFAULT_SYSTEM_PROMPT, OrchestratorConfig, TurnOrchestrator, TurnState};
