//! /word 接口的端到端测试：内存存储 + 模拟 AI 服务商

mod common;

use axum::http::StatusCode;
use common::{app, deepseek, extract_json, fenced_reply, get, post_json, spawn_provider, ProviderReply};
use serde_json::json;
use tower::util::ServiceExt; // for `oneshot`
use word_notebook::llm::LlmProvider;
use word_notebook::services::word_service::{
    CONFIG_ERROR_DEFINITION, GENERATION_FAILED_DEFINITION, GENERATION_FAILED_EXAMPLE,
};

#[tokio::test]
async fn create_word_stores_ai_content() {
    let base = spawn_provider(ProviderReply::Content(fenced_reply("ubiquitous", "无处不在的"))).await;
    let app = app(deepseek(&base));

    let response = app
        .clone()
        .oneshot(post_json("/word", json!({ "text": "  ubiquitous " })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["text"], "ubiquitous");
    assert_eq!(body["definition"], "无处不在的");
    assert_eq!(body["ukPhonetic"], "ˈtɛst");
    assert_eq!(body["usPhonetic"], "ˈtest");
    assert!(body["id"].is_number());
    assert!(body["createdAt"].is_string());

    let list = extract_json(app.oneshot(get("/word")).await.unwrap().into_body()).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["text"], "ubiquitous");
}

#[tokio::test]
async fn legacy_word_field_is_accepted() {
    let base = spawn_provider(ProviderReply::Content(fenced_reply("run", "跑"))).await;

    let response = app(deepseek(&base))
        .oneshot(post_json("/word", json!({ "word": "run" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(extract_json(response.into_body()).await["text"], "run");
}

#[tokio::test]
async fn blank_word_is_rejected() {
    let app = app(LlmProvider::None);

    let response = app
        .clone()
        .oneshot(post_json("/word", json!({ "text": "   " })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");

    let list = extract_json(app.oneshot(get("/word")).await.unwrap().into_body()).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn missing_api_key_stores_placeholder() {
    let response = app(LlmProvider::None)
        .oneshot(post_json("/word", json!({ "text": "ubiquitous" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["text"], "ubiquitous");
    assert_eq!(body["definition"], CONFIG_ERROR_DEFINITION);
}

#[tokio::test]
async fn unparseable_reply_stores_placeholder() {
    let base = spawn_provider(ProviderReply::Content("抱歉，我无法回答。".into())).await;

    let response = app(deepseek(&base))
        .oneshot(post_json("/word", json!({ "text": "serendipity" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["definition"], GENERATION_FAILED_DEFINITION);
    assert_eq!(body["example"], GENERATION_FAILED_EXAMPLE);
}

#[tokio::test]
async fn provider_server_error_stores_placeholder() {
    let base = spawn_provider(ProviderReply::Status(StatusCode::BAD_GATEWAY)).await;

    let response = app(deepseek(&base))
        .oneshot(post_json("/word", json!({ "text": "serendipity" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        extract_json(response.into_body()).await["definition"],
        GENERATION_FAILED_DEFINITION
    );
}

#[tokio::test]
async fn provider_rate_limit_returns_429_without_writing() {
    let base = spawn_provider(ProviderReply::Status(StatusCode::TOO_MANY_REQUESTS)).await;
    let app = app(deepseek(&base));

    let response = app
        .clone()
        .oneshot(post_json("/word", json!({ "text": "serendipity" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"]["code"], "TOO_MANY_REQUESTS");

    let list = extract_json(app.oneshot(get("/word")).await.unwrap().into_body()).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn list_is_newest_first() {
    let app = app(LlmProvider::None);
    for text in ["alpha", "beta", "gamma"] {
        let response = app
            .clone()
            .oneshot(post_json("/word", json!({ "text": text })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let list = extract_json(app.oneshot(get("/word")).await.unwrap().into_body()).await;
    let words = list.as_array().unwrap();
    let texts: Vec<_> = words.iter().map(|w| w["text"].as_str().unwrap()).collect();
    assert_eq!(texts, ["gamma", "beta", "alpha"]);

    let times: Vec<chrono::DateTime<chrono::Utc>> = words
        .iter()
        .map(|w| w["createdAt"].as_str().unwrap().parse().unwrap())
        .collect();
    assert!(times.windows(2).all(|t| t[0] >= t[1]));
}

#[tokio::test]
async fn health_reports_provider() {
    let response = app(LlmProvider::None).oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["llm"], "none");
}

#[tokio::test]
async fn static_site_serves_index() {
    let static_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/static");
    let app = word_notebook::with_static_site(app(LlmProvider::None), static_dir);

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("speechSynthesis"));
}
