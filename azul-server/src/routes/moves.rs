//! Move decision endpoint
//!
//! The request body is a serialized game state; the response is the move the
//! agent on turn should play, or `{ "error": "..." }`.

use crate::state::ServerState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use azul_core::{AzulError, GameState, Move};
use azul_mcts::decide;
use serde_json::json;
use std::sync::Arc;

// ============================================================================
// ERRORS
// ============================================================================

/// Failure surfaced to the HTTP caller
#[derive(Debug)]
pub enum ApiError {
    Decision(AzulError),
    /// The search task died before producing an answer
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Decision(AzulError::InvalidInput(_)) => StatusCode::BAD_REQUEST,
            ApiError::Decision(
                AzulError::InvalidTurn { .. }
                | AzulError::UnknownFactory(_)
                | AzulError::ColorNotInSource { .. }
                | AzulError::NoLegalMoves
                | AzulError::NoValidAction,
            ) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ApiError::Decision(err) => err.to_string(),
            ApiError::Internal(msg) => msg.clone(),
        }
    }
}

impl From<AzulError> for ApiError {
    fn from(err: AzulError) -> Self {
        ApiError::Decision(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!(status = status.as_u16(), "request rejected: {}", self.message());
        (status, Json(json!({ "error": self.message() }))).into_response()
    }
}

// ============================================================================
// HANDLER
// ============================================================================

/// Choose a move for the player on turn.
///
/// The body is taken as raw text so malformed JSON gets the same error
/// envelope as every other failure. The search runs on the blocking pool.
pub async fn choose_move(
    State(state): State<Arc<ServerState>>,
    body: String,
) -> Result<Json<Move>, ApiError> {
    let game = GameState::from_json(&body)?;
    tracing::info!(
        round = game.round,
        player = %game.current_seat(),
        tiles = game.tiles_in_play(),
        "decision requested"
    );

    let config = state.mcts.clone();
    let mv = tokio::task::spawn_blocking(move || decide(&game, &config))
        .await
        .map_err(|e| ApiError::Internal(format!("search task failed: {e}")))??;

    Ok(Json(mv))
}

// ============================================================================
// TESTS
// ============================================================================
