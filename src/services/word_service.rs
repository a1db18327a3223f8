use std::sync::Arc;

use crate::db::WordStore;
use crate::error::{AppError, AppResult};
use crate::llm::sanitizer::{self, GeneratedEntry};
use crate::llm::{LlmError, TextGenerator};
use crate::models::word::{Word, WordFields};

/// 未配置 API Key 时写入的占位内容
pub const CONFIG_ERROR_DEFINITION: &str = "配置错误";
pub const CONFIG_ERROR_EXAMPLE: &str = "请检查 API Key 配置";

/// AI 调用或解析失败时写入的占位内容
pub const GENERATION_FAILED_DEFINITION: &str = "AI 生成失败";
pub const GENERATION_FAILED_EXAMPLE: &str = "请稍后重试";

/// 模型没给例句时的占位
pub const MISSING_EXAMPLE: &str = "暂无例句";

/// 查词流程：调用 AI 生成释义、例句、音标，再写入单词表
pub struct WordService {
    store: Arc<dyn WordStore>,
    llm: Arc<dyn TextGenerator>,
}

impl WordService {
    pub fn new(store: Arc<dyn WordStore>, llm: Arc<dyn TextGenerator>) -> Self {
        Self { store, llm }
    }

    /// 查询并保存一个单词
    ///
    /// 除限流外，AI 相关的失败都不会让请求失败：写入一条占位记录，
    /// 保证用户输入的单词不丢。限流返回 [`AppError::RateLimited`]，不写库。
    pub async fn lookup(&self, raw: &str) -> AppResult<Word> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(AppError::Validation("单词不能为空".into()));
        }

        tracing::info!("👉 开始处理单词: [{}]", text);

        if !self.llm.is_available() {
            tracing::warn!("--- 未配置 AI 服务，写入占位记录: [{}]", text);
            let fields = WordFields::placeholder(text, CONFIG_ERROR_DEFINITION, CONFIG_ERROR_EXAMPLE);
            return Ok(self.store.create(fields).await?);
        }

        match self.generate(text).await {
            Ok(entry) => {
                let word = self.store.upsert(into_fields(text, entry)).await?;
                tracing::info!("<<< 单词已保存: [{}], id={}", word.text, word.id);
                Ok(word)
            }
            Err(LlmError::RateLimited(detail)) => {
                tracing::warn!("--- AI 服务限流，拒绝本次请求: [{}] {}", text, detail);
                Err(AppError::RateLimited("AI 服务请求过于频繁，请稍后再试".into()))
            }
            Err(e) => {
                tracing::error!("!!! 单词 [{}] 生成失败，写入占位记录: {}", text, e);
                let fields = WordFields::placeholder(
                    text,
                    GENERATION_FAILED_DEFINITION,
                    GENERATION_FAILED_EXAMPLE,
                );
                Ok(self.store.create(fields).await?)
            }
        }
    }

    pub async fn list(&self) -> AppResult<Vec<Word>> {
        Ok(self.store.list_all().await?)
    }

    async fn generate(&self, text: &str) -> Result<GeneratedEntry, LlmError> {
        tracing::debug!("⏳ 正在请求 AI 服务...");
        let raw = self.llm.generate(&build_prompt(text)).await?;
        tracing::debug!("AI 原始返回: {}", raw);
        sanitizer::parse_entry(&raw)
    }
}

/// 固定模板的提示词，要求模型只返回 JSON
pub fn build_prompt(word: &str) -> String {
    format!(
        r#"请解释英文单词 "{word}"。
只返回一个 JSON 对象，不要包含 Markdown 标记或任何额外说明。
JSON 格式如下：
{{
  "word": "{word}",
  "meaning": "简明的中文释义",
  "example": "一句英文例句",
  "ukPhonetic": "英式音标 (IPA)",
  "usPhonetic": "美式音标 (IPA)"
}}"#
    )
}

/// 单词文本始终使用用户输入，不采用模型回显的 word 字段
fn into_fields(text: &str, entry: GeneratedEntry) -> WordFields {
    WordFields {
        text: text.to_string(),
        definition: entry.definition,
        example: entry.example.unwrap_or_else(|| MISSING_EXAMPLE.to_string()),
        uk_phonetic: entry.uk_phonetic.unwrap_or_default(),
        us_phonetic: entry.us_phonetic.unwrap_or_default(),
    }
}
