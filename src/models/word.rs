use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use chrono::{DateTime, Utc};

/// 单词本中的一条记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    pub id: i32,
    pub text: String,
    pub definition: String,
    pub example: String,
    pub uk_phonetic: String, // 英式音标 (IPA)
    pub us_phonetic: String, // 美式音标 (IPA)
    pub created_at: DateTime<Utc>,
}

/// 写库时使用的字段集合 (id 与 created_at 由数据库生成)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordFields {
    pub text: String,
    pub definition: String,
    pub example: String,
    pub uk_phonetic: String,
    pub us_phonetic: String,
}

impl WordFields {
    /// AI 生成失败时的占位记录，保证用户输入的单词不会丢失
    pub fn placeholder(text: &str, definition: &str, example: &str) -> Self {
        Self {
            text: text.to_string(),
            definition: definition.to_string(),
            example: example.to_string(),
            uk_phonetic: String::new(),
            us_phonetic: String::new(),
        }
    }
}

/// POST /word 请求体，兼容旧客户端的 `word` 字段
#[derive(Debug, Deserialize)]
pub struct CreateWordRequest {
    pub word: Option<String>,
    pub text: Option<String>,
}

impl CreateWordRequest {
    /// 取第一个非空白的字段，`word` 优先
    pub fn submitted(&self) -> &str {
        [self.word.as_deref(), self.text.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.trim().is_empty())
            .unwrap_or("")
    }
}
