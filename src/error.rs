//! 全局错误类型
//!
//! 处理链路上各层的错误最终汇总为 [`AppError`]，由它决定返回给前端的
//! HTTP 状态码与错误体。

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// 持久层错误
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),

    #[error("数据库迁移失败: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// 启动配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("环境变量 {key} 的值无效: {value}")]
    Invalid { key: &'static str, value: String },
}

/// 接口层错误
#[derive(Debug, Error)]
pub enum AppError {
    /// 400，请求参数不合法
    #[error("{0}")]
    Validation(String),

    /// 429，AI 服务商限流，需要用户稍后重试
    #[error("{0}")]
    RateLimited(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "BAD_REQUEST",
            AppError::RateLimited(_) => "TOO_MANY_REQUESTS",
            AppError::Store(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("!!! 请求处理失败: {}", self);
        }

        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
