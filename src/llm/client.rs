//! Model client trait and a scripted mock for tests

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::error::{ChatError, Result};
use crate::llm::types::{CompletionRequest, CompletionResponse};

/// Stateless LLM client: submit a message list and tool catalog, receive one
/// assistant response. Conversation state lives with the caller.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Single completion request (suspends until the remote completion arrives)
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;
}

/// Mock client that replays scripted responses in order and records every
/// request it receives.
#[derive(Debug, Default)]
pub struct MockLlmClient {
    responses: Mutex<VecDeque<Result<CompletionResponse>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that answers with `responses` in order
    pub fn with_responses(responses: Vec<CompletionResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().map(Ok).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue another response
    pub fn push_response(&self, response: CompletionResponse) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Ok(response));
    }

    /// Queue a failure
    pub fn push_error(&self, error: ChatError) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Err(error));
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Number of scripted responses not yet consumed
    pub fn remaining(&self) -> usize {
        self.responses.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);

        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Err(ChatError::Llm("mock client has no scripted response left".to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::types::Message;

    fn request(text: &str) -> CompletionRequest {
        CompletionRequest::new("mock-model", vec![Message::user(text)])
    }

    #[tokio::test]
    async fn test_mock_replays_in_order() {
        let mock = MockLlmClient::with_responses(vec![
            CompletionResponse::text("first"),
            CompletionResponse::text("second"),
        ]);

        let a = mock.complete(request("1")).await.unwrap();
        let b = mock.complete(request("2")).await.unwrap();

        assert_eq!(a.content.as_deref(), Some("first"));
        assert_eq!(b.content.as_deref(), Some("second"));
        assert_eq!(mock.remaining(), 0);
    }

    #[tokio::test]
    async fn test_mock_records_requests() {
        let mock = MockLlmClient::with_responses(vec![CompletionResponse::text("ok")]);
        mock.complete(request("hello")).await.unwrap();

        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].messages[0].content(), "hello");
    }

    #[tokio::test]
    async fn test_mock_exhausted_is_error() {
        let mock = MockLlmClient::new();
        let err = mock.complete(request("hello")).await.unwrap_err();
        assert!(matches!(err, ChatError::Llm(_)));
    }

    #[tokio::test]
    async fn test_mock_scripted_error() {
        let mock = MockLlmClient::new();
        mock.push_error(ChatError::Api {
            status: 500,
            message: "boom".to_string(),
        });
        mock.push_response(CompletionResponse::text("recovered"));

        assert!(mock.complete(request("a")).await.is_err());
        assert!(mock.complete(request("b")).await.is_ok());
    }
}
