//! HTTP mock tests for the OpenAI-compatible provider.
//!
//! Uses wiremock to simulate the responses a chat-completion gateway sends.

use mindgames_kernel::inference::{
    ChatRequest, InferenceError, LLMProvider, OpenAIConfig, OpenAIProvider,
};
use reqwest::Url;
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_provider_with_mock_server(server: &MockServer, max_retries: u32) -> OpenAIProvider {
    let config = OpenAIConfig::new(
        SecretString::new("test-api-key".into()),
        Url::parse(&format!("{}/", server.uri())).unwrap(),
    )
    .with_max_retries(max_retries)
    .with_base_delay_ms(1);
    OpenAIProvider::new(config)
}

fn create_test_request() -> ChatRequest {
    ChatRequest::with_prompt("openai/gpt-4o-2024-05-13", "Give me a clue")
        .max_tokens(1000)
        .temperature(0.5)
}

fn completion(content: serde_json::Value) -> serde_json::Value {
    json!({
        "choices": [{ "message": { "role": "assistant", "content": content } }],
        "usage": { "prompt_tokens": 12, "completion_tokens": 1, "total_tokens": 13 }
    })
}

async fn mount_status(server: &MockServer, status: u16, body: &str) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

// =============================================================================
// Success
// =============================================================================

#[tokio::test]
async fn test_success_sends_model_sampling_and_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", "Bearer test-api-key"))
        .and(body_partial_json(json!({
            "model": "openai/gpt-4o-2024-05-13",
            "messages": [{ "role": "user", "content": "Give me a clue" }],
            "max_tokens": 1000,
            "temperature": 0.5
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(json!("Nebula"))))
        .expect(1)
        .mount(&server)
        .await;

    let provider = create_provider_with_mock_server(&server, 0);
    let response = provider.chat(create_test_request()).await.unwrap();

    assert_eq!(response.content, "Nebula");
    assert_eq!(response.total_tokens(), Some(13));
}

#[tokio::test]
async fn test_null_content_becomes_empty_string() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(json!(null))))
        .mount(&server)
        .await;

    let provider = create_provider_with_mock_server(&server, 0);
    let response = provider.chat(create_test_request()).await.unwrap();

    assert_eq!(response.content, "");
}

#[tokio::test]
async fn test_empty_choices_is_provider_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let provider = create_provider_with_mock_server(&server, 0);
    let result = provider.chat(create_test_request()).await;

    assert!(matches!(result, Err(InferenceError::ProviderError(_))));
}

// =============================================================================
// Error mapping
// =============================================================================

#[tokio::test]
async fn test_rate_limit_returns_rate_limit_error() {
    let server = MockServer::start().await;
    mount_status(&server, 429, "Rate limit exceeded").await;

    let provider = create_provider_with_mock_server(&server, 0);
    let result = provider.chat(create_test_request()).await;

    assert!(matches!(result, Err(InferenceError::RateLimit)));
}

#[tokio::test]
async fn test_unauthorized_returns_authentication_error() {
    let server = MockServer::start().await;
    mount_status(&server, 401, "invalid api key").await;

    let provider = create_provider_with_mock_server(&server, 0);
    let err = provider.chat(create_test_request()).await.unwrap_err();

    match &err {
        InferenceError::Authentication(msg) => {
            assert!(msg.contains("401"));
            assert!(msg.contains("invalid api key"));
        }
        other => panic!("Expected Authentication, got {other:?}"),
    }
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_forbidden_returns_authentication_error() {
    let server = MockServer::start().await;
    mount_status(&server, 403, "model not allowed").await;

    let provider = create_provider_with_mock_server(&server, 0);
    let result = provider.chat(create_test_request()).await;

    assert!(matches!(result, Err(InferenceError::Authentication(_))));
}

#[tokio::test]
async fn test_payment_required() {
    let server = MockServer::start().await;
    mount_status(&server, 402, "insufficient credits").await;

    let provider = create_provider_with_mock_server(&server, 0);
    let result = provider.chat(create_test_request()).await;

    match result {
        Err(InferenceError::PaymentRequired(msg)) => assert_eq!(msg, "insufficient credits"),
        other => panic!("Expected PaymentRequired, got {other:?}"),
    }
}

#[tokio::test]
async fn test_context_length_exceeded() {
    let server = MockServer::start().await;
    mount_status(
        &server,
        400,
        r#"{"error":{"code":"context_length_exceeded"}}"#,
    )
    .await;

    let provider = create_provider_with_mock_server(&server, 0);
    let result = provider.chat(create_test_request()).await;

    assert!(matches!(result, Err(InferenceError::ContextLengthExceeded)));
}

#[tokio::test]
async fn test_other_bad_request_is_provider_error() {
    let server = MockServer::start().await;
    mount_status(&server, 400, "unknown model").await;

    let provider = create_provider_with_mock_server(&server, 0);
    let result = provider.chat(create_test_request()).await;

    match result {
        Err(InferenceError::ProviderError(msg)) => assert!(msg.contains("unknown model")),
        other => panic!("Expected ProviderError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_returns_server_error() {
    let server = MockServer::start().await;
    mount_status(&server, 500, "Internal Server Error").await;

    let provider = create_provider_with_mock_server(&server, 0);
    let result = provider.chat(create_test_request()).await;

    match result {
        Err(InferenceError::ServerError(msg)) => assert!(msg.contains("500")),
        other => panic!("Expected ServerError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_network_error_when_nothing_listens() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let config = OpenAIConfig::new(
        SecretString::new("test-api-key".into()),
        Url::parse(&format!("http://127.0.0.1:{port}/")).unwrap(),
    )
    .with_max_retries(0);
    let provider = OpenAIProvider::new(config);

    let result = provider.chat(create_test_request()).await;

    match result {
        Err(err @ InferenceError::NetworkError(_)) => assert!(err.is_retryable()),
        other => panic!("Expected NetworkError, got {other:?}"),
    }
}

// =============================================================================
// Retry
// =============================================================================

#[tokio::test]
async fn test_transient_failure_is_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(json!("comet"))))
        .expect(1)
        .mount(&server)
        .await;

    let provider = create_provider_with_mock_server(&server, 2);
    let response = provider.chat(create_test_request()).await.unwrap();

    assert_eq!(response.content, "comet");
}

#[tokio::test]
async fn test_rate_limit_gives_up_after_max_retries() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429))
        .expect(3)
        .mount(&server)
        .await;

    let provider = create_provider_with_mock_server(&server, 2);
    let result = provider.chat(create_test_request()).await;

    assert!(matches!(result, Err(InferenceError::RateLimit)));
}

#[tokio::test]
async fn test_unlisted_server_status_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(501).set_body_string("not implemented"))
        .expect(1)
        .mount(&server)
        .await;

    let provider = create_provider_with_mock_server(&server, 3);
    let err = provider.chat(create_test_request()).await.unwrap_err();

    match &err {
        InferenceError::ProviderError(msg) => assert!(msg.contains("501")),
        other => panic!("Expected ProviderError, got {other:?}"),
    }
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_authentication_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let provider = create_provider_with_mock_server(&server, 3);
    let result = provider.chat(create_test_request()).await;

    assert!(matches!(result, Err(InferenceError::Authentication(_))));
}
