use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    service::GameService,
    types::{CheckGuessRequest, CheckGuessResponse, CreateGameRequest, CreateGameResponse, GameResponse},
};
use crate::shared::{AppError, AppState};

/// HTTP handler for creating a new game
///
/// POST /game
/// Selects five random rounds and returns the new game's id
#[instrument(name = "create_game", skip(state, request))]
pub async fn create_game(
    State(state): State<AppState>,
    Json(request): Json<CreateGameRequest>,
) -> Result<Json<CreateGameResponse>, AppError> {
    let service = GameService::new(
        Arc::clone(&state.level_repository),
        Arc::clone(&state.game_repository),
    );
    let game = service.create_new_game(request).await?;

    info!(game_id = %game.id, "Game created successfully");

    Ok(Json(CreateGameResponse { game_id: game.id }))
}

/// HTTP handler for fetching a game's round plan and bookkeeping
///
/// GET /game/:game_id
#[instrument(name = "get_game", skip(state))]
pub async fn get_game(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Json<GameResponse>, AppError> {
    let service = GameService::new(
        Arc::clone(&state.level_repository),
        Arc::clone(&state.game_repository),
    );
    let game = service.get_game(&game_id).await?;

    Ok(Json(GameResponse::from(game)))
}

/// HTTP handler for checking a guess against a level
///
/// POST /guess
/// Returns the true coordinates, distance in feet, and the round score
#[instrument(name = "check_guess", skip(state, request))]
pub async fn check_guess(
    State(state): State<AppState>,
    Json(request): Json<CheckGuessRequest>,
) -> Result<Json<CheckGuessResponse>, AppError> {
    let service = GameService::new(
        Arc::clone(&state.level_repository),
        Arc::clone(&state.game_repository),
    );
    let response = service
        .check_guess(&request.level_id, request.guess_lat, request.guess_lng)
        .await?;

    Ok(Json(response))
}
