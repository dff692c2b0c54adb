//! Integration tests for azul-server API

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use azul_core::{Color, GameState, Move, Target, Tile, WALL_SIZE};
use azul_mcts::MctsConfig;
use azul_server::{create_router, ServerState};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

fn test_app() -> axum::Router {
    app_with(MctsConfig::iterations(40).with_seed(17))
}

fn app_with(config: MctsConfig) -> axum::Router {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("warn"))
        .with_test_writer()
        .try_init();
    create_router(Arc::new(ServerState::new(config)))
}

fn opening() -> GameState {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    GameState::new_game(["Ada", "Bob"], &mut rng)
}

async fn post_move(app: axum::Router, body: String) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/move")
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_status_endpoint() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/status")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["status"], "ok");
    assert_eq!(json["engine"], "mcts-ucb1");
    assert_eq!(json["iterations"], 40);
    assert!(json["learningTimeMs"].is_null());
}

#[tokio::test]
async fn test_move_endpoint_returns_legal_move() {
    let state = opening();
    let (status, json) = post_move(test_app(), state.to_json().unwrap()).await;

    assert_eq!(status, StatusCode::OK);
    assert!(json.get("factoryId").is_some());
    assert!(json["color"].is_string());
    let pattern_line = json["patternLine"].as_i64().unwrap();
    assert!((-1..=4).contains(&pattern_line));

    let mv: Move = serde_json::from_value(json).unwrap();
    assert!(state.legal_moves().contains(&mv));
}

#[tokio::test]
async fn test_move_endpoint_accepts_capitalized_colors() {
    let state = opening();
    let body = state
        .to_json()
        .unwrap()
        .replace("\"blue\"", "\"Blue\"")
        .replace("\"red\"", "\"Red\"");

    let (status, _) = post_move(test_app(), body).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_single_legal_move_answers_immediately() {
    let mut state = opening();
    for row in 0..WALL_SIZE {
        state.players[0].board.wall.place(row, Tile::new(Color::Blue));
    }
    state.factories.iter_mut().for_each(|f| f.tiles.clear());
    state.center = vec![Tile::new(Color::Blue)];

    // Would not return for an hour if the search ran
    let app = app_with(MctsConfig::time_limited(Duration::from_secs(3600)));
    let (status, json) = post_move(app, state.to_json().unwrap()).await;

    assert_eq!(status, StatusCode::OK);
    let mv: Move = serde_json::from_value(json).unwrap();
    assert_eq!(mv, Move::new(None, Color::Blue, Target::Floor));
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let (status, json) = post_move(test_app(), "{ not json".to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("invalid game state"));
}

#[tokio::test]
async fn test_wrong_player_count_is_bad_request() {
    let mut value: Value = serde_json::from_str(&opening().to_json().unwrap()).unwrap();
    value["players"].as_array_mut().unwrap().pop();

    let (status, json) = post_move(test_app(), value.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_bad_player_index_is_bad_request() {
    let mut value: Value = serde_json::from_str(&opening().to_json().unwrap()).unwrap();
    value["currentPlayerIndex"] = serde_json::json!(3);

    let (status, _) = post_move(test_app(), value.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_empty_table_is_unprocessable() {
    let mut state = opening();
    state.factories.iter_mut().for_each(|f| f.tiles.clear());

    let (status, json) = post_move(test_app(), state.to_json().unwrap()).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"], "no legal moves available");
}

#[tokio::test]
async fn test_cors_headers_present() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/status")
                .header("origin", "http://localhost:3000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "*"
    );
}
