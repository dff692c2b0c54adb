//! Azul Server - HTTP boundary for the MCTS agent
//!
//! This crate provides the web backend:
//! - `POST /api/move`: serialized game state in, chosen move out
//! - `GET /api/status`: health check
//! - Permissive CORS for browser clients

mod routes;
mod state;

use axum::{
    routing::{get, post},
    Router,
};
use azul_mcts::MctsConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

pub use routes::moves::ApiError;
pub use state::ServerState;

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    /// Search settings used for every decision
    pub mcts: MctsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3001,
            mcts: MctsConfig::default(),
        }
    }
}

/// Create the router with all routes
pub fn create_router(state: Arc<ServerState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/status", get(routes::status::status_handler))
        .route("/api/move", post(routes::moves::choose_move))
        .with_state(state)
        .layer(cors)
}

/// Start the HTTP server
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = Arc::new(ServerState::new(config.mcts.clone()));
    let router = create_router(state);

    tracing::info!("Azul MCTS server starting on http://0.0.0.0:{}", config.port);
    tracing::info!("Search budget: {:?}", config.mcts.budget);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
