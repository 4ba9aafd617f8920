//! HTTP tests for the chat-completions client using wiremock.

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use toolchat::ChatError;
use toolchat::llm::{
    CompletionRequest, FinishReason, LlmClient, Message, OpenAiClient, OpenAiConfig, ToolDescriptor,
};

fn client_for(server: &MockServer) -> OpenAiClient {
    let config = OpenAiConfig::default().with_base_url(server.uri());
    OpenAiClient::with_api_key("test-key".to_string(), config).unwrap()
}

fn request() -> CompletionRequest {
    CompletionRequest::new("gpt-4o-mini", vec![Message::system("be brief"), Message::user("hi")])
}

#[tokio::test]
async fn complete_sends_auth_and_tools() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({"model": "gpt-4o-mini", "tool_choice": "auto"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {"name": "get_weather", "arguments": "{\"location\":\"Paris\"}"}
                    }]
                },
                "finish_reason": "tool_calls"
            }],
            "usage": {"prompt_tokens": 20, "completion_tokens": 5}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let tool = ToolDescriptor::new(
        "get_weather",
        "Weather lookup",
        json!({"type": "object", "properties": {"location": {"type": "string"}}}),
    );
    let response = client_for(&server)
        .complete(request().with_tools(vec![tool]))
        .await
        .unwrap();

    assert_eq!(response.finish_reason, FinishReason::ToolCalls);
    assert_eq!(response.tool_calls.len(), 1);
    assert_eq!(response.tool_calls[0].arguments, r#"{"location":"Paris"}"#);
    assert_eq!(response.usage.total(), 25);
}

#[tokio::test]
async fn complete_reports_rate_limit_with_retry_hint() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "7"))
        .mount(&server)
        .await;

    let err = client_for(&server).complete(request()).await.unwrap_err();

    match err {
        ChatError::Api { status, message } => {
            assert_eq!(status, 429);
            assert!(message.contains("retry after 7 seconds"), "got: {message}");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn complete_rate_limit_without_header_defaults_to_sixty_seconds() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = client_for(&server).complete(request()).await.unwrap_err();
    assert!(
        matches!(&err, ChatError::Api { status: 429, message } if message.contains("retry after 60 seconds")),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn complete_surfaces_status_and_body_on_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream overloaded"))
        .mount(&server)
        .await;

    let err = client_for(&server).complete(request()).await.unwrap_err();

    assert!(err.is_model_error());
    assert!(
        matches!(&err, ChatError::Api { status: 503, message } if message == "upstream overloaded"),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn complete_rejects_undecodable_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).complete(request()).await.unwrap_err();
    assert!(
        matches!(&err, ChatError::Llm(message) if message.starts_with("Failed to parse response")),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn complete_rejects_response_without_choices() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let err = client_for(&server).complete(request()).await.unwrap_err();
    assert!(matches!(err, ChatError::Llm(_)), "got: {err:?}");
}
