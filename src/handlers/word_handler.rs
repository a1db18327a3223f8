use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::error::AppResult;
use crate::models::word::CreateWordRequest;
use crate::AppState;

/// 1. 添加单词 (调用 AI 生成释义后入库)
pub async fn create_word(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateWordRequest>,
) -> AppResult<impl IntoResponse> {
    tracing::info!(">>> 收到添加单词请求: {:?}", payload.submitted());

    let word = state.words.lookup(payload.submitted()).await?;
    Ok((StatusCode::CREATED, Json(word)))
}

/// 2. 获取单词列表 (最新的在前)
pub async fn list_words(State(state): State<Arc<AppState>>) -> AppResult<impl IntoResponse> {
    let words = state.words.list().await?;
    tracing::debug!("<<< 单词列表获取完毕, 数量: {}", words.len());
    Ok((StatusCode::OK, Json(words)))
}

/// 健康检查，顺带报告当前使用的 AI 服务商
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({ "status": "ok", "llm": state.llm_provider }))
}
