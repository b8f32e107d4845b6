//! DeepShield detection service.
//!
//! Accepts a real and a reference media file on `POST /detect`, embeds
//! sampled frames of each with Facenet512 and answers with the cosine and
//! euclidean similarity of the two feature batches. `GET /health` reports
//! liveness.
//!
//! All settings come from `DEEPSHIELD_*` environment variables, see
//! [`config::Config`]. Logging is controlled with `RUST_LOG`.
use std::{error::Error, sync::Arc, time::Duration};

use axum::{
    extract::DefaultBodyLimit,
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use tokio::{net::TcpListener, signal::ctrl_c};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use config::Config;
use routes::{detect_handler, health_handler};
use state::State;

/// Multipart framing on top of the two files.
const BODY_OVERHEAD_BYTES: u64 = 1024 * 1024;

pub fn build_router(state: Arc<State>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let body_limit = state.config.max_upload_bytes * 2 + BODY_OVERHEAD_BYTES;

    Router::new()
        .route("/detect", post(detect_handler))
        .route("/health", get(health_handler))
        .layer(DefaultBodyLimit::max(body_limit as usize))
        .layer(cors)
        .with_state(state)
}

pub async fn start_server() -> Result<(), Box<dyn Error + Send + Sync>> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Loading configuration...");
    let config = Config::load()?;
    tokio::fs::create_dir_all(&config.media_dir).await?;

    info!("Initializing state...");
    let state = tokio::task::spawn_blocking(move || State::load(config)).await??;

    let address = state.config.address();
    info!("Binding to {address}");
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
