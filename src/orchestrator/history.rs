//! Conversation history owned by the orchestrator

use crate::error::{ChatError, Result};
use crate::llm::Message;

/// Ordered message sequence starting with one system message.
///
/// Mutation goes through `append` and `reset_to_system_only`; the
/// crate-internal checkpoint/rollback pair lets a failed turn leave no trace.
#[derive(Debug, Clone)]
pub struct History {
    messages: Vec<Message>,
}

impl History {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::system(system_prompt)],
        }
    }

    /// Append a message.
    ///
    /// A tool message must answer a request made by an earlier assistant
    /// message, and only the initial message may be a system message.
    pub fn append(&mut self, message: Message) -> Result<()> {
        match &message {
            Message::System { .. } => {
                return Err(ChatError::InvalidState(
                    "system message can only start the history".to_string(),
                ));
            }
            Message::Tool { tool_call_id, .. } if !self.has_request(tool_call_id) => {
                return Err(ChatError::InvalidState(format!(
                    "tool result {} has no matching assistant request",
                    tool_call_id
                )));
            }
            _ => {}
        }

        self.messages.push(message);
        Ok(())
    }

    /// Read-only view for the model client
    pub fn snapshot(&self) -> &[Message] {
        &self.messages
    }

    /// Drop everything except the initial system message
    pub fn reset_to_system_only(&mut self) {
        self.messages.truncate(1);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Never true; the system message is always present
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn system_prompt(&self) -> &str {
        self.messages[0].content()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub(crate) fn checkpoint(&self) -> usize {
        self.messages.len()
    }

    pub(crate) fn rollback(&mut self, checkpoint: usize) {
        self.messages.truncate(checkpoint.max(1));
    }

    fn has_request(&self, id: &str) -> bool {
        self.messages
            .iter()
            .rev()
            .flat_map(|m| m.tool_calls())
            .any(|call| call.id == id)
    }
}
