//! HTTP API over the league store.
//!
//! Every route is a thin handler that extracts ids and a JSON body, calls the
//! matching league or scoring operation, and maps `LeagueError` onto a status
//! code through [`ApiError`].

mod error;
pub mod leagues;
pub mod points;

pub use error::ApiError;

use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::config::{Config, ServerConfig};
use crate::store::Store;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
}

async fn health_handler() -> Json<Value> {
    Json(json!({ "ok": true }))
}

pub fn build_router(state: AppState, server: &ServerConfig) -> Result<Router> {
    let origin = HeaderValue::from_str(server.client_origin.trim()).with_context(|| {
        format!("Invalid client origin '{}'", server.client_origin)
    })?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Ok(Router::new()
        .route("/api/health", get(health_handler))
        .route(
            "/leagues",
            get(leagues::list_leagues_handler).post(leagues::create_league_handler),
        )
        .route(
            "/leagues/{league_id}",
            get(leagues::get_league_handler).delete(leagues::delete_league_handler),
        )
        .route(
            "/leagues/{league_id}/players",
            get(leagues::list_players_handler).post(leagues::create_player_handler),
        )
        .route(
            "/leagues/{league_id}/players/{player_id}",
            get(leagues::get_player_handler),
        )
        .route(
            "/leagues/{league_id}/players/{player_id}/total",
            get(points::league_total_handler),
        )
        .route(
            "/leagues/{league_id}/rounds",
            get(leagues::list_rounds_handler).post(leagues::create_round_handler),
        )
        .route(
            "/leagues/{league_id}/rounds/{round_id}",
            get(leagues::get_round_handler),
        )
        .route(
            "/leagues/{league_id}/rounds/{round_id}/players/{player_id}",
            put(leagues::add_round_participant_handler),
        )
        .route(
            "/leagues/{league_id}/rounds/{round_id}/points-allocation",
            get(points::list_allocations_handler),
        )
        .route(
            "/leagues/{league_id}/rounds/{round_id}/points-allocation/{player_id}",
            post(points::record_allocation_handler),
        )
        .route(
            "/leagues/{league_id}/rounds/{round_id}/points-allocation/{player_id}/total",
            get(points::round_total_handler),
        )
        .route(
            "/leagues/{league_id}/point-weighting",
            get(points::list_weights_handler).post(points::set_weight_handler),
        )
        .route("/leagues/{league_id}/standings", get(points::standings_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state))
}

/// Bind the configured port and serve until Ctrl+C or SIGTERM.
pub async fn serve(config: &Config, store: Store) -> Result<()> {
    let app = build_router(AppState { store }, &config.server)?;

    let address = format!("0.0.0.0:{}", config.server.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
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
