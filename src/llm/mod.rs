//! AI 文本生成
//!
//! 服务层只依赖 [`TextGenerator`]，真实实现是 [`LlmClient`]，测试里可以
//! 换成任意假实现。

use async_trait::async_trait;

pub mod client;
pub mod error;
pub mod sanitizer;

pub use client::{LlmClient, LlmProvider};
pub use error::LlmError;

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// 是否已配置可用的服务商；为 false 时调用方不应发起请求
    fn is_available(&self) -> bool;

    /// 发送提示词，返回模型生成的原始文本
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}
