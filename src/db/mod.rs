use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::word::{Word, WordFields};

pub mod memory;
pub mod postgres;

pub use memory::MemoryWordStore;
pub use postgres::PgWordStore;

/// 单词表的读写接口，`text` 为唯一键，每个操作都是单行单语句
#[async_trait]
pub trait WordStore: Send + Sync {
    /// 插入新单词；同名单词已存在时原样返回旧记录
    async fn create(&self, fields: WordFields) -> Result<Word, StoreError>;

    /// 按 text 插入或覆盖，覆盖时保留原 created_at
    async fn upsert(&self, fields: WordFields) -> Result<Word, StoreError>;

    /// 全部单词，按创建时间倒序
    async fn list_all(&self) -> Result<Vec<Word>, StoreError>;
}
