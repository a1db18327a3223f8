//! AI 单词本后端
//!
//! 用户提交单词，服务调用 AI 生成释义、例句和英美音标后存入数据库，
//! 前端页面按时间倒序展示已保存的单词。

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod llm;
pub mod models;
pub mod services;

use services::word_service::WordService;

// 全局状态，Handler 通过它拿到查词服务
pub struct AppState {
    pub words: WordService,
    pub llm_provider: &'static str,
}

/// 构建路由 (不含静态页面)
pub fn build_router(state: Arc<AppState>) -> Router {
    // 开发阶段允许所有来源跨域
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/word", post(handlers::word_handler::create_word)
            .get(handlers::word_handler::list_words))
        .route("/health", get(handlers::word_handler::health))

        // 中间件：日志记录和跨域
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// 在 API 路由之外挂载前端页面
pub fn with_static_site(router: Router, static_dir: &str) -> Router {
    let index = format!("{}/index.html", static_dir.trim_end_matches('/'));
    router.fallback_service(ServeDir::new(static_dir).not_found_service(ServeFile::new(index)))
}
