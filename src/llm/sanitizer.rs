//! 清理模型返回的文本并提取其中的 JSON
//!
//! 模型经常把 JSON 包在 Markdown 代码块或解释性文字里。这里的做法是：
//! 去掉代码块标记，取第一个 `{` 到最后一个 `}` 之间的内容再解析。
//! 如果回复里出现多段花括号 (比如解释文字中又举了一个 JSON 例子)，
//! 截取结果会跨越多段并解析失败，这是已知的局限。

use serde_json::{Map, Value};

use super::error::LlmError;

/// 模型生成的单词信息，字段已映射为入库字段名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedEntry {
    pub definition: String,
    pub example: Option<String>,
    pub uk_phonetic: Option<String>,
    pub us_phonetic: Option<String>,
}

/// 去掉代码块标记，截取最外层花括号之间的内容
pub fn sanitize(raw: &str) -> String {
    let text = raw.replace("```json", "").replace("```", "");
    let text = text.trim();

    match (text.find('{'), text.rfind('}')) {
        (Some(first), Some(last)) if first < last => text[first..=last].to_string(),
        _ => text.to_string(),
    }
}

/// 清理并解析模型回复，逐个字段显式映射
///
/// 模型返回的字段名不保证与数据库一致：释义可能叫 `meaning` 也可能叫
/// `definition`，音标可能是驼峰也可能是下划线。缺少释义视为解析失败。
pub fn parse_entry(raw: &str) -> Result<GeneratedEntry, LlmError> {
    let cleaned = sanitize(raw);
    let value: Value = serde_json::from_str(&cleaned)?;

    let obj = value
        .as_object()
        .ok_or_else(|| LlmError::ParseError(format!("期望 JSON 对象，实际为: {}", cleaned)))?;

    let definition = pick(obj, &["meaning", "definition"])
        .ok_or_else(|| LlmError::ParseError(format!("缺少释义字段: {}", cleaned)))?;

    Ok(GeneratedEntry {
        definition,
        example: pick(obj, &["example"]),
        uk_phonetic: pick(obj, &["ukPhonetic", "uk_phonetic"]),
        us_phonetic: pick(obj, &["usPhonetic", "us_phonetic"]),
    })
}

/// 按顺序取第一个非空字符串字段
fn pick(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| obj.get(*k).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}
