use std::sync::Arc;

use anyhow::Context;
use dotenvy::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use word_notebook::config::AppConfig;
use word_notebook::db::{MemoryWordStore, PgWordStore, WordStore};
use word_notebook::llm::{LlmClient, LlmProvider};
use word_notebook::services::word_service::WordService;
use word_notebook::{build_router, with_static_site, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 初始化日志系统
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 2. 加载 .env 环境变量
    dotenv().ok();
    let config = AppConfig::from_env()?;

    // 3. 初始化存储：有 DATABASE_URL 用 Postgres，否则退回内存
    let store: Arc<dyn WordStore> = match &config.database_url {
        Some(url) => {
            let pg = PgWordStore::connect(url, 5)
                .await
                .context("Failed to create database connection pool")?;
            pg.migrate().await.context("Failed to run database migrations")?;
            Arc::new(pg)
        }
        None => {
            tracing::warn!("--- 未设置 DATABASE_URL，使用内存存储，重启后数据会丢失");
            Arc::new(MemoryWordStore::new())
        }
    };

    // 4. 初始化 AI 客户端，只在启动时构建一次
    match &config.provider {
        LlmProvider::None => {
            tracing::warn!("❌ 未配置 DEEPSEEK_API_KEY / GEMINI_API_KEY，新单词将写入占位内容")
        }
        provider => tracing::info!("✅ AI 服务商: {}", provider.name()),
    }
    let llm_provider = config.provider.name();
    let llm = Arc::new(LlmClient::new(config.provider.clone(), config.llm_timeout)?);

    let shared_state = Arc::new(AppState {
        words: WordService::new(store, llm),
        llm_provider,
    });

    // 5. 构建路由
    let app = with_static_site(build_router(shared_state), &config.static_dir);

    // 6. 启动服务
    tracing::info!("🚀 Server started at http://{}", config.addr);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
