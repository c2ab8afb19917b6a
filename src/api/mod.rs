//! HTTP layer exposing fetch-and-analyse reports as JSON.

pub mod routes;
pub mod types;

use std::{net::SocketAddr, sync::Arc};

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::{analysis::Analyzer, config::Settings};

#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub analyzer: Arc<Analyzer>,
}

impl AppState {
    pub fn new(settings: Settings, analyzer: Analyzer) -> Self {
        Self {
            settings,
            analyzer: Arc::new(analyzer),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/headlines", get(routes::headlines))
        .route("/search", get(routes::search))
        .route("/analyze", post(routes::analyze))
        .route("/define/:word", get(routes::define))
        .route("/sources", get(routes::sources))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(settings: Settings, host: String, port: u16) -> Result<()> {
    let analyzer = Analyzer::from_settings(&settings);
    let router = router(AppState::new(settings, analyzer));

    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .with_context(|| format!("invalid bind address {host}:{port}"))?;
    info!(%addr, "serving news-lens API");
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
