//! Status endpoint

use crate::state::ServerState;
use axum::{extract::State, Json};
use azul_mcts::SearchBudget;
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub engine: &'static str,
    /// Wall-clock budget per decision, absent for iteration budgets
    pub learning_time_ms: Option<u64>,
    pub iterations: Option<u32>,
}

pub async fn status_handler(State(state): State<Arc<ServerState>>) -> Json<StatusResponse> {
    let (learning_time_ms, iterations) = match state.mcts.budget {
        SearchBudget::Time(limit) => (Some(limit.as_millis() as u64), None),
        SearchBudget::Iterations(count) => (None, Some(count)),
    };

    Json(StatusResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        engine: "mcts-ucb1",
        learning_time_ms,
        iterations,
    })
}
