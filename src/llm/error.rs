use thiserror::Error;

/// AI 服务调用过程中可能出现的错误
#[derive(Debug, Error)]
pub enum LlmError {
    /// 未配置 API Key，AI 生成不可用
    #[error("AI 服务未配置")]
    Unavailable,

    /// 服务商返回 HTTP 429
    #[error("AI 服务商限流: {0}")]
    RateLimited(String),

    #[error("AI 服务返回 HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// 网络层失败 (连接、超时等)
    #[error("AI 请求失败: {0}")]
    RequestFailed(String),

    #[error("AI 返回内容为空")]
    EmptyResponse,

    #[error("AI 返回内容解析失败: {0}")]
    ParseError(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::RequestFailed(format!("请求超时: {}", err))
        } else if err.is_decode() {
            LlmError::ParseError(err.to_string())
        } else {
            LlmError::RequestFailed(err.to_string())
        }
    }
}

impl From<serde_json::Error> for LlmError {
    fn from(err: serde_json::Error) -> Self {
        LlmError::ParseError(err.to_string())
    }
}
