use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::WordStore;
use crate::error::StoreError;
use crate::models::word::{Word, WordFields};

/// 内存版单词表，未配置 DATABASE_URL 时使用，重启即丢失
#[derive(Default)]
pub struct MemoryWordStore {
    words: RwLock<Vec<Word>>,
}

impl MemoryWordStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(words: &mut Vec<Word>, fields: WordFields) -> Word {
        let id = words.iter().map(|w| w.id).max().unwrap_or(0) + 1;
        let word = Word {
            id,
            text: fields.text,
            definition: fields.definition,
            example: fields.example,
            uk_phonetic: fields.uk_phonetic,
            us_phonetic: fields.us_phonetic,
            created_at: Utc::now(),
        };
        words.push(word.clone());
        word
    }
}

#[async_trait]
impl WordStore for MemoryWordStore {
    async fn create(&self, fields: WordFields) -> Result<Word, StoreError> {
        let mut words = self.words.write().await;
        if let Some(existing) = words.iter().find(|w| w.text == fields.text) {
            return Ok(existing.clone());
        }
        Ok(Self::insert(&mut words, fields))
    }

    async fn upsert(&self, fields: WordFields) -> Result<Word, StoreError> {
        let mut words = self.words.write().await;
        match words.iter_mut().find(|w| w.text == fields.text) {
            Some(existing) => {
                existing.definition = fields.definition;
                existing.example = fields.example;
                existing.uk_phonetic = fields.uk_phonetic;
                existing.us_phonetic = fields.us_phonetic;
                Ok(existing.clone())
            }
            None => Ok(Self::insert(&mut words, fields)),
        }
    }

    async fn list_all(&self) -> Result<Vec<Word>, StoreError> {
        let mut words = self.words.read().await.clone();
        words.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(words)
    }
}
