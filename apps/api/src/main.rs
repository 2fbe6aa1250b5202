mod config;
mod db;
mod errors;
mod generation;
mod layout;
mod llm_client;
mod mahjong;
mod menu;
mod models;
mod routes;
mod state;
mod storage;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, ensure_schema};
use crate::generation::generator::QuestionGenerator;
use crate::layout::{DirSpriteSource, SpriteCache, TileImageGenerator};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::PgQuestionStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Held until shutdown so buffered file logs are flushed
    let _log_guard = init_logging(&config)?;

    info!("Starting Nanikiru API v{}", env!("CARGO_PKG_VERSION"));

    // Sprite cache: every tile must load or the service does not start
    let sprites = SpriteCache::load(&DirSpriteSource::new(config.sprite_dir.clone()))?;
    let tile_images = TileImageGenerator::new(sprites);

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    ensure_schema(&db).await?;
    let store = Arc::new(PgQuestionStore::new(db));

    // Initialize LLM client
    let llm = LlmClient::new(config.openai_api_key.clone(), config.gpt.clone())?;
    info!(
        "LLM client initialized (model: {}, temperature: {}, max_tokens: {}, n: {})",
        llm.model(),
        config.gpt.temperature,
        config.gpt.max_tokens,
        config.gpt.n
    );
    let generator = QuestionGenerator::new(Arc::new(llm));

    // Build app state
    let state = AppState {
        store,
        generator,
        tile_images,
    };

    // Build router
    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Installs the global subscriber: stdout always, plus a daily-rolling file when `LOG_DIR` is set.
fn init_logging(config: &Config) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
    });

    let (file_layer, guard) = match &config.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let appender = tracing_appender::rolling::daily(dir, "nanikiru.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();

    if let Some(dir) = &config.log_dir {
        info!("File logging enabled: {}/nanikiru.log", dir.display());
    }

    Ok(guard)
}
