use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::game::repository::GameRepository;
use crate::leaderboard::repository::LeaderboardRepository;
use crate::level::repository::LevelRepository;
use crate::level::selector::SelectionError;
use crate::scoring::ScoringError;
use crate::session::repository::OngoingGameRepository;
use crate::user::repository::UserRepository;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub level_repository: Arc<dyn LevelRepository + Send + Sync>,
    pub game_repository: Arc<dyn GameRepository + Send + Sync>,
    pub ongoing_game_repository: Arc<dyn OngoingGameRepository + Send + Sync>,
    pub leaderboard_repository: Arc<dyn LeaderboardRepository + Send + Sync>,
    pub user_repository: Arc<dyn UserRepository + Send + Sync>,
}

impl AppState {
    pub fn new(
        level_repository: Arc<dyn LevelRepository + Send + Sync>,
        game_repository: Arc<dyn GameRepository + Send + Sync>,
        ongoing_game_repository: Arc<dyn OngoingGameRepository + Send + Sync>,
        leaderboard_repository: Arc<dyn LeaderboardRepository + Send + Sync>,
        user_repository: Arc<dyn UserRepository + Send + Sync>,
    ) -> Self {
        Self {
            level_repository,
            game_repository,
            ongoing_game_repository,
            leaderboard_repository,
            user_repository,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not enough levels available: {available} of {required} required")]
    InsufficientLevels { available: usize, required: usize },

    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal server error")]
    Internal,
}

impl From<SelectionError> for AppError {
    fn from(error: SelectionError) -> Self {
        match error {
            SelectionError::InsufficientLevels {
                available,
                required,
            } => AppError::InsufficientLevels {
                available,
                required,
            },
        }
    }
}

impl From<ScoringError> for AppError {
    fn from(error: ScoringError) -> Self {
        match error {
            ScoringError::InvalidCoordinate(message) => AppError::InvalidCoordinate(message),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InsufficientLevels { .. } => (StatusCode::CONFLICT, self.to_string()),
            AppError::InvalidCoordinate(msg) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid coordinate: {}", msg),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::DatabaseError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", msg),
            ),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
