#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use word_notebook::db::MemoryWordStore;
use word_notebook::llm::{LlmClient, LlmProvider};
use word_notebook::services::word_service::WordService;
use word_notebook::{build_router, AppState};

pub const API_KEY: &str = "test-key";

/// 模拟服务商的行为
#[derive(Clone)]
pub enum ProviderReply {
    Content(String),
    Status(StatusCode),
}

/// 在随机端口启动一个模拟的 AI 服务商，返回 base_url
pub async fn spawn_provider(reply: ProviderReply) -> String {
    let chat_reply = reply.clone();
    let gemini_reply = reply;

    let app = Router::new()
        .route(
            "/chat/completions",
            post(move |headers: HeaderMap, Json(body): Json<Value>| {
                let reply = chat_reply.clone();
                async move {
                    let expected = format!("Bearer {}", API_KEY);
                    let auth = headers.get("authorization").and_then(|v| v.to_str().ok());
                    if auth != Some(expected.as_str()) {
                        return StatusCode::UNAUTHORIZED.into_response();
                    }
                    assert!(body["messages"][0]["content"].is_string());
                    match reply {
                        ProviderReply::Content(text) => Json(json!({
                            "choices": [{ "message": { "role": "assistant", "content": text } }]
                        }))
                        .into_response(),
                        ProviderReply::Status(status) => (status, "provider error").into_response(),
                    }
                }
            }),
        )
        .route(
            "/v1beta/models/:call",
            post(move |headers: HeaderMap| {
                let reply = gemini_reply.clone();
                async move {
                    if headers.get("x-goog-api-key").and_then(|v| v.to_str().ok()) != Some(API_KEY) {
                        return StatusCode::FORBIDDEN.into_response();
                    }
                    match reply {
                        ProviderReply::Content(text) => Json(json!({
                            "candidates": [{ "content": { "parts": [{ "text": text }] } }]
                        }))
                        .into_response(),
                        ProviderReply::Status(status) => (status, "provider error").into_response(),
                    }
                }
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

pub fn deepseek(base_url: &str) -> LlmProvider {
    LlmProvider::DeepSeek {
        base_url: base_url.to_string(),
        api_key: API_KEY.to_string(),
        model: "deepseek-chat".to_string(),
    }
}

pub fn gemini(base_url: &str) -> LlmProvider {
    LlmProvider::Gemini {
        base_url: base_url.to_string(),
        api_key: API_KEY.to_string(),
        model: "gemini-2.5-flash-lite".to_string(),
    }
}

pub fn client(provider: LlmProvider) -> LlmClient {
    LlmClient::new(provider, Duration::from_secs(5)).unwrap()
}

/// 使用内存存储构建完整的应用路由
pub fn app(provider: LlmProvider) -> Router {
    let llm_provider = provider.name();
    let state = AppState {
        words: WordService::new(Arc::new(MemoryWordStore::new()), Arc::new(client(provider))),
        llm_provider,
    };
    build_router(Arc::new(state))
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

/// 一段典型的模型回复：代码块包裹，带前后说明文字
pub fn fenced_reply(word: &str, meaning: &str) -> String {
    format!(
        "好的，以下是结果：\n```json\n{}\n```",
        json!({
            "word": word,
            "meaning": meaning,
            "example": format!("The word {} appears here.", word),
            "ukPhonetic": "ˈtɛst",
            "usPhonetic": "ˈtest",
        })
    )
}
