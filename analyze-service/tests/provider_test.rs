//! Provider tests against a stubbed upstream API.

use analyze_service::config::{ProviderConfig, ProviderKind};
use analyze_service::prompts::{AnalysisMode, Prompt};
use analyze_service::services::providers::gemini::GeminiProvider;
use analyze_service::services::providers::groq::GroqProvider;
use analyze_service::services::{build_provider, ProviderError, TextProvider};
use analyze_service::{build_router, AppState};
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn groq_config(server: &MockServer) -> ProviderConfig {
    ProviderConfig::new(ProviderKind::Groq, "gsk-test").with_base_url(server.uri())
}

fn gemini_config(server: &MockServer) -> ProviderConfig {
    ProviderConfig::new(ProviderKind::Gemini, "AIza-test").with_base_url(server.uri())
}

async fn sent_body(server: &MockServer) -> serde_json::Value {
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1, "expected exactly one upstream call");
    requests[0].body_json().unwrap()
}

#[tokio::test]
async fn groq_sends_chat_completion_and_returns_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer gsk-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "chatcmpl-1",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": "> ML MODEL INITIATED..." },
                "finish_reason": "stop"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = GroqProvider::new(groq_config(&server)).unwrap();
    let prompt = Prompt::new(AnalysisMode::Behavioral, "xX_dark_lord_Xx");

    let text = provider.generate(&prompt).await.unwrap();
    assert_eq!(text, "> ML MODEL INITIATED...");

    let body = sent_body(&server).await;
    assert_eq!(body["model"], "llama3-8b-8192");
    assert_eq!(body["messages"][0]["role"], "system");
    let system = body["messages"][0]["content"].as_str().unwrap();
    assert!(system.contains("Behavioral ML Engine"));
    assert!(system.matches("xX_dark_lord_Xx").count() >= 2);
    assert_eq!(
        body["messages"][1]["content"],
        "Analyze the username: xX_dark_lord_Xx"
    );
}

#[tokio::test]
async fn groq_error_object_is_upstream_error_regardless_of_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "message": "invalid_api_key", "type": "invalid_request_error" }
        })))
        .mount(&server)
        .await;

    let provider = GroqProvider::new(groq_config(&server)).unwrap();
    let err = provider
        .generate(&Prompt::new(AnalysisMode::Osint, "johndoe123"))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Upstream(ref m) if m == "invalid_api_key"));
}

#[tokio::test]
async fn non_json_body_is_malformed_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let provider = GroqProvider::new(groq_config(&server)).unwrap();
    let err = provider
        .generate(&Prompt::new(AnalysisMode::Osint, "johndoe123"))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::MalformedResponse(_)));
}

#[tokio::test]
async fn unreachable_upstream_is_network_error() {
    let config =
        ProviderConfig::new(ProviderKind::Groq, "gsk-test").with_base_url("http://127.0.0.1:1");
    let provider = GroqProvider::new(config).unwrap();

    let err = provider
        .generate(&Prompt::new(AnalysisMode::Osint, "johndoe123"))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Network(_)));
}

#[tokio::test]
async fn gemini_sends_system_instruction_and_returns_part_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.0-flash:generateContent"))
        .and(query_param("key", "AIza-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{ "text": "> FORENSIC OSINT AUDIT INITIATED\n> TARGET ACQUIRED: johndoe123" }]
                },
                "finishReason": "STOP"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = GeminiProvider::new(gemini_config(&server)).unwrap();
    let text = provider
        .generate(&Prompt::new(AnalysisMode::Osint, "johndoe123"))
        .await
        .unwrap();

    assert_eq!(
        text,
        "> FORENSIC OSINT AUDIT INITIATED\n> TARGET ACQUIRED: johndoe123"
    );

    let body = sent_body(&server).await;
    let system = body["systemInstruction"]["parts"][0]["text"]
        .as_str()
        .unwrap();
    assert!(system.contains("Cyber Forensic OSINT Engine"));
    assert_eq!(
        body["contents"][0]["parts"][0]["text"],
        "Analyze the username: johndoe123"
    );
}

#[tokio::test]
async fn gemini_error_object_is_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "INVALID_ARGUMENT"
            }
        })))
        .mount(&server)
        .await;

    let provider = GeminiProvider::new(gemini_config(&server)).unwrap();
    let err = provider
        .generate(&Prompt::new(AnalysisMode::Behavioral, "neo"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ProviderError::Upstream(ref m) if m == "API key not valid. Please pass a valid API key."
    ));
}

async fn post_analyze(state: AppState, body: &str) -> (StatusCode, serde_json::Value) {
    let response = build_router(state)
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/analyze")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn ml_scenario_through_router_with_stubbed_groq() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": "> ML MODEL INITIATED..." } }]
        })))
        .mount(&server)
        .await;

    let provider = build_provider(&groq_config(&server)).unwrap();
    let (status, body) = post_analyze(
        AppState::new(provider),
        r#"{"type":"ml","data":"xX_dark_lord_Xx"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "result": "> ML MODEL INITIATED..." }));
}

#[tokio::test]
async fn osint_scenario_surfaces_upstream_error_inline() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "message": "invalid_api_key" }
        })))
        .mount(&server)
        .await;

    let provider = build_provider(&groq_config(&server)).unwrap();
    let (status, body) = post_analyze(
        AppState::new(provider),
        r#"{"type":"osint","data":"johndoe123"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "result": "> API ERROR: invalid_api_key" }));
}

async fn analyze_against_groq_error(error_body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(error_body))
        .mount(&server)
        .await;

    let provider = build_provider(&groq_config(&server)).unwrap();
    post_analyze(
        AppState::new(provider),
        r#"{"type":"osint","data":"johndoe123"}"#,
    )
    .await
}

#[tokio::test]
async fn bare_string_error_is_surfaced_inline() {
    let (status, body) = analyze_against_groq_error(json!({ "error": "invalid_api_key" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "result": "> API ERROR: invalid_api_key" }));
}

#[tokio::test]
async fn non_string_error_message_is_surfaced_inline() {
    let (status, body) = analyze_against_groq_error(json!({ "error": { "message": 401 } })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "result": "> API ERROR: 401" }));
}

#[tokio::test]
async fn null_error_field_falls_through_to_content() {
    let (status, body) = analyze_against_groq_error(json!({
        "error": null,
        "choices": [{ "message": { "role": "assistant", "content": "ok" } }]
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "result": "ok" }));
}

#[tokio::test]
async fn broken_upstream_through_router_is_engine_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let provider = build_provider(&gemini_config(&server)).unwrap();
    let (status, body) = post_analyze(
        AppState::new(provider),
        r#"{"type":"ml","data":"neo"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Engine failure" }));
}
