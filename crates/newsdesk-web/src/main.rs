use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use newsdesk_core::config_file;
use newsdesk_parsing::{ArticleExtractor, ParsingConfigBuilder};
use newsdesk_pdf_mupdf::MupdfBackend;
use newsdesk_store::SqliteRepository;
use newsdesk_web::{AppState, build_router};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("newsdesk=info,tower_http=info")),
        )
        .with(fmt::layer())
        .init();

    let config = config_file::load_config();

    let db_path = config.db_path();
    let repo = SqliteRepository::open(&db_path)
        .with_context(|| format!("failed to open database at {}", db_path.display()))?;

    let parsing = ParsingConfigBuilder::new()
        .with_file_section(config.parsing.as_ref())
        .build()
        .context("invalid [parsing] configuration")?;

    let state = Arc::new(AppState {
        repo: Arc::new(repo),
        backend: Arc::new(MupdfBackend::default()),
        extractor: Arc::new(ArticleExtractor::with_config(parsing)),
        max_upload_bytes: config.max_upload_bytes(),
    });

    let app = build_router(state);

    let addr: SocketAddr = config
        .bind()
        .parse()
        .with_context(|| format!("invalid bind address {}", config.bind()))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, db = %db_path.display(), "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
