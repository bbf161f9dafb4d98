use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

use crate::application::routes::app_router;
use crate::application::state::{AppState, AppStateConfig};
use crate::infrastructure::generation::GenerationConfig;
use crate::infrastructure::overlay::TextRenderer;

pub struct ServerConfig {
    pub bind_address: SocketAddr,
    pub generation: GenerationConfig,
    pub stats_path: PathBuf,
    pub storage_dir: PathBuf,
    pub font_path: Option<PathBuf>,
}

pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    // Catch a mistyped endpoint at startup instead of on the first request.
    url::Url::parse(&config.generation.url)
        .with_context(|| format!("invalid generation endpoint {}", config.generation.url))?;

    let renderer = TextRenderer::load(config.font_path.as_deref());

    let state = AppState::from_config(AppStateConfig {
        generation: config.generation,
        stats_path: config.stats_path.clone(),
        storage_dir: config.storage_dir.clone(),
        renderer,
    });

    state
        .thumbnails
        .ensure_storage()
        .await
        .with_context(|| {
            format!(
                "failed to create storage directory {}",
                config.storage_dir.display()
            )
        })?;

    // Surface the stats situation once at startup; requests re-read the
    // file, so a record appearing later is picked up without a restart.
    if state.thumbnails.stats().await.is_some() {
        info!(path = %config.stats_path.display(), "trending statistics loaded");
    } else {
        info!(path = %config.stats_path.display(), "no trending statistics, using generic prompts");
    }

    let listener = TcpListener::bind(config.bind_address)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_address))?;

    let app = app_router(state);

    info!(
        address = %config.bind_address,
        storage = %config.storage_dir.display(),
        "starting HTTP server"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated unexpectedly")?;

    info!("server shutdown complete");

    Ok(())
}

#[allow(clippy::expect_used)] // Startup: panicking is appropriate if signal handlers fail
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
