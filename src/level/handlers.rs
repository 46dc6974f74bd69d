use axum::{extract::State, Json};
use tracing::{info, instrument};

use super::models::LevelModel;
use super::repository::LevelRepository;
use crate::shared::{AppError, AppState};

/// HTTP handler for listing the level pool
///
/// GET /levels
/// Returns all stored levels, including coordinates and play counts
#[instrument(name = "list_levels", skip(state))]
pub async fn list_levels(State(state): State<AppState>) -> Result<Json<Vec<LevelModel>>, AppError> {
    let levels = state.level_repository.get_levels().await?;

    info!(level_count = levels.len(), "Levels listed successfully");

    Ok(Json(levels))
}
