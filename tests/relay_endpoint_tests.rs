//! Relay endpoint tests at the HTTP boundary.
//!
//! The router is exercised in-process with `tower::ServiceExt::oneshot`; the
//! inference provider is replaced by a recording stand-in.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use relaychat::connector::api::{http_router, CHAT_PATH};
use relaychat::{ChatClient, ChatMessage, DomainError, RelayChatUseCase};

struct RecordingProvider {
    calls: Mutex<Vec<Vec<ChatMessage>>>,
    reply: Result<String, String>,
}

impl RecordingProvider {
    fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            reply: Ok(text.to_string()),
        })
    }

    fn failing(detail: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            reply: Err(detail.to_string()),
        })
    }

    fn calls(&self) -> Vec<Vec<ChatMessage>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatClient for RecordingProvider {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, DomainError> {
        self.calls.lock().unwrap().push(messages.to_vec());
        self.reply.clone().map_err(DomainError::provider)
    }
}

async fn post(provider: Arc<RecordingProvider>, body: impl Into<Body>) -> (StatusCode, Value) {
    let app = http_router(Arc::new(RelayChatUseCase::new(provider)));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(CHAT_PATH)
                .header("content-type", "application/json")
                .body(body.into())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_invalid_messages_are_rejected_without_calling_provider() {
    let bodies = [
        json!({}).to_string(),
        json!({"messages": null}).to_string(),
        json!({"messages": []}).to_string(),
        json!({"messages": "Olá"}).to_string(),
        json!({"messages": {"role": "user", "content": "Olá"}}).to_string(),
        "this is not json".to_string(),
        String::new(),
    ];

    for body in bodies {
        let provider = RecordingProvider::replying("unused");
        let (status, value) = post(provider.clone(), body.clone()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {:?}", body);
        assert_eq!(value, json!({"error": "invalid messages"}));
        assert!(provider.calls().is_empty(), "provider called for {:?}", body);
    }
}

#[tokio::test]
async fn test_valid_transcript_is_forwarded_as_role_content_pairs() {
    let provider = RecordingProvider::replying("Olá! Como posso ajudar?");
    let body = json!({
        "messages": [
            {"id": "a1", "role": "user", "content": "Olá"},
            {"id": "a2", "role": "assistant", "content": "Oi"},
            {"id": "a3", "role": "user", "content": "Tudo bem?", "extra": true}
        ]
    });

    let (status, value) = post(provider.clone(), body.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(value, json!({"content": "Olá! Como posso ajudar?"}));
    assert_eq!(
        provider.calls(),
        vec![vec![
            ChatMessage::new("user", "Olá"),
            ChatMessage::new("assistant", "Oi"),
            ChatMessage::new("user", "Tudo bem?"),
        ]]
    );
}

#[tokio::test]
async fn test_provider_failure_is_reported_without_upstream_detail() {
    let provider = RecordingProvider::failing("401 Unauthorized: token hf_secret is invalid");
    let body = json!({"messages": [{"role": "user", "content": "Olá"}]});

    let (status, value) = post(provider.clone(), body.to_string()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(value, json!({"error": "internal server error"}));
    assert!(!value.to_string().contains("hf_secret"));
    assert_eq!(provider.calls().len(), 1);
}

#[tokio::test]
async fn test_endpoint_stays_available_after_failure() {
    let failing = RecordingProvider::failing("boom");
    let app = http_router(Arc::new(RelayChatUseCase::new(failing)));
    let request = || {
        Request::builder()
            .method("POST")
            .uri(CHAT_PATH)
            .body(Body::from(
                json!({"messages": [{"role": "user", "content": "hi"}]}).to_string(),
            ))
            .unwrap()
    };

    let first = app.clone().oneshot(request()).await.unwrap();
    let second = app.oneshot(request()).await.unwrap();

    assert_eq!(first.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(second.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_only_post_is_routed() {
    let app = http_router(Arc::new(RelayChatUseCase::new(RecordingProvider::replying("x"))));

    let response = app
        .oneshot(Request::builder().uri(CHAT_PATH).body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_element_shape_is_forwarded_untouched() {
    let provider = RecordingProvider::replying("hello");
    let body = json!({
        "messages": [{"role": "user", "content": [{"type": "text", "text": "hi"}]}]
    });

    let (status, value) = post(provider.clone(), body.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(value, json!({"content": "hello"}));
    assert_eq!(
        provider.calls(),
        vec![vec![ChatMessage {
            role: json!("user"),
            content: json!([{"type": "text", "text": "hi"}]),
        }]]
    );
}
