//! Tests for the language-model backed agents: request shape, prompt
//! content and error propagation.

use async_trait::async_trait;
use mindgames_kernel::agents::{AgentCapability, AgentError, LlmAgents, SamplingSettings};
use mindgames_kernel::game::Helper;
use mindgames_kernel::inference::{
    ChatRequest, ChatResponse, InferenceError, LLMProvider, OpenAIConfig, OpenAIProvider, Role,
};
use parking_lot::Mutex;
use reqwest::Url;
use secrecy::SecretString;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sampling() -> SamplingSettings {
    SamplingSettings {
        model: "openai/gpt-4o-2024-05-13".to_string(),
        max_tokens: 1000,
        temperature: 0.5,
    }
}

// =============================================================================
// Recording provider
// =============================================================================

struct RecordingProvider {
    reply: Result<String, InferenceError>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl RecordingProvider {
    fn replying(reply: Result<String, InferenceError>) -> Arc<Self> {
        Arc::new(Self {
            reply,
            requests: Mutex::new(Vec::new()),
        })
    }

    fn last_prompt(&self) -> String {
        let requests = self.requests.lock();
        let request = requests.last().expect("no request sent");
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, Role::User);
        request.messages[0].content.clone()
    }
}

#[async_trait]
impl LLMProvider for RecordingProvider {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, InferenceError> {
        self.requests.lock().push(request);
        self.reply.clone().map(ChatResponse::new)
    }
}

#[tokio::test]
async fn test_helper_request_uses_sampling_settings() {
    let provider = RecordingProvider::replying(Ok(" Galaxy ".to_string()));
    let agents = LlmAgents::new(provider.clone(), sampling());

    let clue = agents
        .helper_clue(Helper::First, "nebula", &[], 1)
        .await
        .unwrap();

    assert_eq!(clue, " Galaxy ", "raw text is returned untouched");
    let requests = provider.requests.lock();
    assert_eq!(requests[0].model, "openai/gpt-4o-2024-05-13");
    assert_eq!(requests[0].max_tokens, Some(1000));
    assert_eq!(requests[0].temperature, Some(0.5));
}

#[tokio::test]
async fn test_helper_prompt_carries_word_round_and_history() {
    let provider = RecordingProvider::replying(Ok("Dust".to_string()));
    let agents = LlmAgents::new(provider.clone(), sampling());
    let history = vec![
        "Helper 1 Clue: Space".to_string(),
        "The Oracle Guess: star".to_string(),
    ];

    agents
        .helper_clue(Helper::Second, "nebula", &history, 3)
        .await
        .unwrap();

    let prompt = provider.last_prompt();
    assert!(prompt.contains("Helper Agent 2"));
    assert!(prompt.contains("\"nebula\""));
    assert!(prompt.contains("Current Round: 3."));
    assert!(prompt.contains("Helper 1 Clue: Space, The Oracle Guess: star"));
    assert!(prompt.contains("more specific"));
}

#[tokio::test]
async fn test_guesser_prompt_lists_history_line_by_line() {
    let provider = RecordingProvider::replying(Ok("Star".to_string()));
    let agents = LlmAgents::new(provider.clone(), sampling());
    let history = vec![
        "Helper 1 Clue: Space".to_string(),
        "The Oracle Guess: moon".to_string(),
        "Helper 2 Clue: Cloud".to_string(),
    ];

    let guess = agents.guesser_guess(&history).await.unwrap();

    assert_eq!(guess, "Star");
    let prompt = provider.last_prompt();
    assert!(prompt.contains(
        "Helper 1 Clue: Space\nThe Oracle Guess: moon\nHelper 2 Clue: Cloud"
    ));
    assert!(!prompt.contains("nebula"));
}

#[tokio::test]
async fn test_provider_error_is_propagated() {
    let provider = RecordingProvider::replying(Err(InferenceError::RateLimit));
    let agents = LlmAgents::new(provider, sampling());

    let err = agents.guesser_guess(&[]).await.unwrap_err();

    assert!(matches!(err, AgentError::Inference(InferenceError::RateLimit)));
    assert!(!err.is_timeout());
    assert_eq!(err.to_string(), "Rate Limit Exceeded");
}

// =============================================================================
// Over HTTP
// =============================================================================

#[tokio::test]
async fn test_agents_over_openai_compatible_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("Helper Agent 1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": "Cosmos." } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = OpenAIConfig::new(
        SecretString::new("test-api-key".into()),
        Url::parse(&format!("{}/", server.uri())).unwrap(),
    )
    .with_max_retries(0);
    let agents = LlmAgents::new(Arc::new(OpenAIProvider::new(config)), sampling());

    let clue = agents
        .helper_clue(Helper::First, "nebula", &[], 1)
        .await
        .unwrap();

    assert_eq!(clue, "Cosmos.");
}
