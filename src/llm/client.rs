use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde_json::{json, Value};

use super::error::LlmError;
use super::TextGenerator;

pub const DEEPSEEK_BASE_URL: &str = "https://api.deepseek.com";
pub const DEEPSEEK_MODEL: &str = "deepseek-chat";
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const GEMINI_MODEL: &str = "gemini-2.5-flash-lite";

/// AI 服务商
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlmProvider {
    /// DeepSeek (OpenAI 兼容的 chat/completions 接口)
    DeepSeek { base_url: String, api_key: String, model: String },
    /// Google Gemini generateContent 接口
    Gemini { base_url: String, api_key: String, model: String },
    /// 未配置 API Key，所有调用直接返回 Unavailable
    None,
}

impl LlmProvider {
    pub fn name(&self) -> &'static str {
        match self {
            LlmProvider::DeepSeek { .. } => "deepseek",
            LlmProvider::Gemini { .. } => "gemini",
            LlmProvider::None => "none",
        }
    }
}

/// 进程内唯一的 AI 客户端，启动时根据环境变量构建一次，之后所有请求共享
pub struct LlmClient {
    provider: LlmProvider,
    http: Client,
}

impl LlmClient {
    pub fn new(provider: LlmProvider, timeout: Duration) -> Result<Self, LlmError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { provider, http })
    }

    pub fn provider(&self) -> &LlmProvider {
        &self.provider
    }

    async fn generate_deepseek(
        &self,
        base_url: &str,
        api_key: &str,
        model: &str,
        prompt: &str,
    ) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", base_url.trim_end_matches('/'));
        let body = json!({
            "model": model,
            "messages": [{ "role": "user", "content": prompt }],
            "stream": false,
        });

        let resp = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let json: Value = check_status(resp).await?.json().await?;
        extract_chat_text(&json)
    }

    async fn generate_gemini(
        &self,
        base_url: &str,
        api_key: &str,
        model: &str,
        prompt: &str,
    ) -> Result<String, LlmError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            base_url.trim_end_matches('/'),
            model
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
        });

        let resp = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let json: Value = check_status(resp).await?.json().await?;
        extract_gemini_text(&json)
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    fn is_available(&self) -> bool {
        !matches!(self.provider, LlmProvider::None)
    }

    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let start = Instant::now();
        let result = match &self.provider {
            LlmProvider::None => return Err(LlmError::Unavailable),
            LlmProvider::DeepSeek { base_url, api_key, model } => {
                self.generate_deepseek(base_url, api_key, model, prompt).await
            }
            LlmProvider::Gemini { base_url, api_key, model } => {
                self.generate_gemini(base_url, api_key, model, prompt).await
            }
        };

        tracing::debug!(
            "AI 调用结束: provider={}, 耗时={}ms, ok={}",
            self.provider.name(),
            start.elapsed().as_millis(),
            result.is_ok()
        );
        result
    }
}

/// 429 单独映射为限流错误，其余非 2xx 统一为 Http 错误
async fn check_status(resp: Response) -> Result<Response, LlmError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    if status == StatusCode::TOO_MANY_REQUESTS {
        tracing::warn!("--- AI 服务商限流: {}", body);
        Err(LlmError::RateLimited(body))
    } else {
        tracing::warn!("--- AI 服务返回错误: HTTP {}, {}", status, body);
        Err(LlmError::Http { status: status.as_u16(), body })
    }
}

/// 从 chat/completions 响应中取 choices[0].message.content
fn extract_chat_text(json: &Value) -> Result<String, LlmError> {
    let text = json["choices"][0]["message"]["content"]
        .as_str()
        .ok_or_else(|| LlmError::ParseError(format!("响应缺少 choices[0].message.content: {}", json)))?;

    non_empty(text)
}

/// 从 generateContent 响应中拼接 candidates[0].content.parts[*].text
fn extract_gemini_text(json: &Value) -> Result<String, LlmError> {
    let parts = json["candidates"][0]["content"]["parts"]
        .as_array()
        .ok_or_else(|| LlmError::ParseError(format!("响应缺少 candidates[0].content.parts: {}", json)))?;

    let text: String = parts.iter().filter_map(|p| p["text"].as_str()).collect();
    non_empty(&text)
}

fn non_empty(text: &str) -> Result<String, LlmError> {
    if text.trim().is_empty() {
        Err(LlmError::EmptyResponse)
    } else {
        Ok(text.to_string())
    }
}
