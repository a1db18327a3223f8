use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use crate::error::ConfigError;
use crate::llm::client::{DEEPSEEK_BASE_URL, DEEPSEEK_MODEL, GEMINI_BASE_URL, GEMINI_MODEL};
use crate::llm::LlmProvider;

/// 启动配置，全部来自环境变量 (可由 .env 提供)
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// 为空时使用内存存储
    pub database_url: Option<String>,
    pub addr: SocketAddr,
    pub provider: LlmProvider,
    pub llm_timeout: Duration,
    pub static_dir: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 便于测试：从任意键值来源读取配置
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // 空字符串与未设置同等对待
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let host: IpAddr = match get("HOST") {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid { key: "HOST", value: v })?,
            None => IpAddr::V4(Ipv4Addr::LOCALHOST),
        };
        let port: u16 = match get("PORT") {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid { key: "PORT", value: v })?,
            None => 3000,
        };
        let timeout_secs: u64 = match get("LLM_TIMEOUT_SECS") {
            Some(v) => v
                .parse()
                .ok()
                .filter(|s| *s > 0)
                .ok_or(ConfigError::Invalid { key: "LLM_TIMEOUT_SECS", value: v })?,
            None => 30,
        };

        let provider = if let Some(api_key) = get("DEEPSEEK_API_KEY") {
            LlmProvider::DeepSeek {
                base_url: get("DEEPSEEK_BASE_URL").unwrap_or_else(|| DEEPSEEK_BASE_URL.into()),
                api_key,
                model: get("DEEPSEEK_MODEL").unwrap_or_else(|| DEEPSEEK_MODEL.into()),
            }
        } else if let Some(api_key) = get("GEMINI_API_KEY") {
            LlmProvider::Gemini {
                base_url: get("GEMINI_BASE_URL").unwrap_or_else(|| GEMINI_BASE_URL.into()),
                api_key,
                model: get("GEMINI_MODEL").unwrap_or_else(|| GEMINI_MODEL.into()),
            }
        } else {
            LlmProvider::None
        };

        Ok(Self {
            database_url: get("DATABASE_URL"),
            addr: SocketAddr::new(host, port),
            provider,
            llm_timeout: Duration::from_secs(timeout_secs),
            static_dir: get("STATIC_DIR").unwrap_or_else(|| "static".into()),
        })
    }
}
