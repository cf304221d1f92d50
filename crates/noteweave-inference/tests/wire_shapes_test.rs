//! Integration tests for provider wire shapes.
//!
//! These verify the exact request payloads and headers each provider
//! backend puts on the wire, and how response envelopes are interpreted.

use noteweave_core::{GenerationBackend, GenerationSettings, Provider};
use noteweave_inference::backend_for;
use noteweave_inference::openai::{OpenAiBackend, OpenAiConfig};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn chat_response(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-123",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

#[tokio::test]
async fn test_ollama_payload_shape_and_no_auth_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "model": "llama3",
            "response": "4",
            "done": true
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let settings = GenerationSettings {
        provider: Provider::Ollama,
        endpoint: mock_server.uri(),
        api_key: "should-not-be-sent".to_string(),
        model: "llama3".to_string(),
        ..Default::default()
    };
    let backend = backend_for(&settings).unwrap();

    let result = backend.generate_with_system("", "2+2=").await;
    assert_eq!(result.unwrap(), "4");

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);

    let request = &requests[0];
    assert!(
        request.headers.get("authorization").is_none(),
        "Ollama requests must not carry an Authorization header"
    );

    let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
    let object = body.as_object().unwrap();
    for key in ["model", "prompt", "temperature", "max_tokens"] {
        assert!(object.contains_key(key), "missing body key {key}");
    }
    assert_eq!(body["model"], "llama3");
    assert_eq!(body["prompt"], "2+2=");
}

#[tokio::test]
async fn test_openai_bearer_auth_and_messages_array() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("Authorization", "Bearer sk-test-key"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_response("Test response")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let settings = GenerationSettings {
        provider: Provider::OpenAi,
        endpoint: mock_server.uri(),
        api_key: "sk-test-key".to_string(),
        ..Default::default()
    };
    let backend = backend_for(&settings).unwrap();

    let result = backend
        .generate_with_system("A: no lies.", "2+2=\n")
        .await;
    assert_eq!(result.unwrap(), "Test response");

    let requests = mock_server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();

    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "system");
    assert_eq!(messages[0]["content"], "A: no lies.");
    assert_eq!(messages[1]["role"], "user");
    assert_eq!(messages[1]["content"], "2+2=\n");
    assert_eq!(body["stream"], false);
}

#[tokio::test]
async fn test_openai_system_message_omitted_when_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_response("ok")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let backend = OpenAiBackend::new(OpenAiConfig {
        base_url: mock_server.uri(),
        ..Default::default()
    })
    .unwrap();

    backend.generate_with_system("", "just a prompt").await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();

    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["role"], "user");
}

#[tokio::test]
async fn test_openai_v1_base_not_doubled() {
    let mock_server = MockServer::start().await;

    // Base already ends in /v1: only /chat/completions is appended.
    Mock::given(method("POST"))
        .and(path("/api/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_response("ok")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let backend = OpenAiBackend::new(OpenAiConfig {
        base_url: format!("{}/api/v1", mock_server.uri()),
        ..Default::default()
    })
    .unwrap();

    let result = backend.generate("hello").await;
    assert!(result.is_ok(), "unexpected error: {:?}", result.err());
}

#[tokio::test]
async fn test_openai_bare_base_gets_full_suffix() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/custom/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_response("ok")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let backend = OpenAiBackend::new(OpenAiConfig {
        base_url: format!("{}/custom", mock_server.uri()),
        ..Default::default()
    })
    .unwrap();

    let result = backend.generate("hello").await;
    assert!(result.is_ok(), "unexpected error: {:?}", result.err());
}

#[tokio::test]
async fn test_openai_empty_choices_is_malformed_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "chatcmpl-123",
            "choices": []
        })))
        .mount(&mock_server)
        .await;

    let backend = OpenAiBackend::new(OpenAiConfig {
        base_url: mock_server.uri(),
        ..Default::default()
    })
    .unwrap();

    let err = backend.generate("hello").await.unwrap_err();
    assert!(
        err.to_string().contains("malformed response"),
        "unexpected error: {err}"
    );
}

#[tokio::test]
async fn test_openai_non_2xx_surfaces_status_and_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&mock_server)
        .await;

    let backend = OpenAiBackend::new(OpenAiConfig {
        base_url: mock_server.uri(),
        ..Default::default()
    })
    .unwrap();

    let err = backend.generate("hello").await.unwrap_err();
    let message = err.to_string();
    assert!(message.contains("500"), "unexpected error: {message}");
    assert!(
        message.contains("upstream exploded"),
        "unexpected error: {message}"
    );
}

#[tokio::test]
async fn test_ollama_non_2xx_surfaces_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(404).set_body_string("model not found"))
        .mount(&mock_server)
        .await;

    let settings = GenerationSettings {
        provider: Provider::Ollama,
        endpoint: mock_server.uri(),
        model: "missing".to_string(),
        ..Default::default()
    };
    let backend = backend_for(&settings).unwrap();

    let err = backend.generate("hello").await.unwrap_err();
    let message = err.to_string();
    assert!(message.contains("404"), "unexpected error: {message}");
    assert!(
        message.contains("model not found"),
        "unexpected error: {message}"
    );
}
