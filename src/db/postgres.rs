use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};

use super::WordStore;
use crate::error::StoreError;
use crate::models::word::{Word, WordFields};

pub struct PgWordStore {
    pool: PgPool,
}

impl PgWordStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    /// 执行 migrations/ 下的建表脚本
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl WordStore for PgWordStore {
    async fn create(&self, fields: WordFields) -> Result<Word, StoreError> {
        // 冲突时做一次空更新，使 RETURNING 能带回已有记录
        let word = sqlx::query_as::<_, Word>(
            r#"
            INSERT INTO words (text, definition, example, uk_phonetic, us_phonetic)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (text) DO UPDATE SET text = EXCLUDED.text
            RETURNING id, text, definition, example, uk_phonetic, us_phonetic, created_at
            "#,
        )
        .bind(&fields.text)
        .bind(&fields.definition)
        .bind(&fields.example)
        .bind(&fields.uk_phonetic)
        .bind(&fields.us_phonetic)
        .fetch_one(&self.pool)
        .await?;

        Ok(word)
    }

    async fn upsert(&self, fields: WordFields) -> Result<Word, StoreError> {
        let word = sqlx::query_as::<_, Word>(
            r#"
            INSERT INTO words (text, definition, example, uk_phonetic, us_phonetic)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (text) DO UPDATE SET
                definition = EXCLUDED.definition,
                example = EXCLUDED.example,
                uk_phonetic = EXCLUDED.uk_phonetic,
                us_phonetic = EXCLUDED.us_phonetic
            RETURNING id, text, definition, example, uk_phonetic, us_phonetic, created_at
            "#,
        )
        .bind(&fields.text)
        .bind(&fields.definition)
        .bind(&fields.example)
        .bind(&fields.uk_phonetic)
        .bind(&fields.us_phonetic)
        .fetch_one(&self.pool)
        .await?;

        Ok(word)
    }

    async fn list_all(&self) -> Result<Vec<Word>, StoreError> {
        let words = sqlx::query_as::<_, Word>(
            r#"
            SELECT id, text, definition, example, uk_phonetic, us_phonetic, created_at
            FROM words
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(words)
    }
}
