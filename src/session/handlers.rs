use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use tracing::instrument;

use super::{
    models::OngoingGameModel,
    service::SessionService,
    types::{DeleteOngoingResponse, FinalizeRequest, FinalizeResponse, SaveProgressRequest},
};
use crate::shared::{AppError, AppState};

fn session_service(state: &AppState) -> SessionService {
    SessionService::new(
        Arc::clone(&state.game_repository),
        Arc::clone(&state.ongoing_game_repository),
        Arc::clone(&state.leaderboard_repository),
        Arc::clone(&state.user_repository),
    )
}

/// HTTP handler for saving resumable progress
///
/// PUT /game/:game_id/ongoing
/// Creates the session on first save, replaces it afterwards
#[instrument(name = "save_progress", skip(state, request))]
pub async fn save_progress(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
    Json(request): Json<SaveProgressRequest>,
) -> Result<Json<OngoingGameModel>, AppError> {
    let ongoing = session_service(&state)
        .save_progress(&game_id, request)
        .await?;
    Ok(Json(ongoing))
}

/// HTTP handler for resuming a session
///
/// GET /game/:game_id/ongoing/:user_id
/// 404 when the user has no session for this game
#[instrument(name = "get_ongoing", skip(state))]
pub async fn get_ongoing(
    State(state): State<AppState>,
    Path((game_id, user_id)): Path<(String, String)>,
) -> Result<Json<OngoingGameModel>, AppError> {
    let ongoing = session_service(&state)
        .get_ongoing(&game_id, &user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Ongoing game not found".to_string()))?;
    Ok(Json(ongoing))
}

/// HTTP handler for discarding a session
///
/// DELETE /game/:game_id/ongoing/:user_id
#[instrument(name = "delete_ongoing", skip(state))]
pub async fn delete_ongoing(
    State(state): State<AppState>,
    Path((game_id, user_id)): Path<(String, String)>,
) -> Result<Json<DeleteOngoingResponse>, AppError> {
    let deleted = session_service(&state)
        .delete_ongoing(&game_id, &user_id)
        .await?;
    Ok(Json(DeleteOngoingResponse { deleted }))
}

/// HTTP handler for finalizing a completed game
///
/// POST /game/:game_id/finalize
/// Idempotent: a retry returns the entry the first call created
#[instrument(name = "finalize_game", skip(state, request))]
pub async fn finalize_game(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
    Json(request): Json<FinalizeRequest>,
) -> Result<Json<FinalizeResponse>, AppError> {
    let response = session_service(&state).finalize(&game_id, request).await?;
    Ok(Json(response))
}
