use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::{
    models::{GameModel, GameType},
    repository::GameRepository,
    types::{CheckGuessResponse, CreateGameRequest},
};
use crate::{
    level::{repository::LevelRepository, selector::select_level_ids},
    scoring::{evaluate_guess, ROUNDS_PER_GAME},
    shared::AppError,
};

/// Service for game creation and guess checking
pub struct GameService {
    level_repository: Arc<dyn LevelRepository + Send + Sync>,
    game_repository: Arc<dyn GameRepository + Send + Sync>,
}

impl GameService {
    pub fn new(
        level_repository: Arc<dyn LevelRepository + Send + Sync>,
        game_repository: Arc<dyn GameRepository + Send + Sync>,
    ) -> Self {
        Self {
            level_repository,
            game_repository,
        }
    }

    /// Creates a new game from five uniformly random distinct levels and
    /// bumps each chosen level's play counter
    #[instrument(skip(self))]
    pub async fn create_new_game(&self, request: CreateGameRequest) -> Result<GameModel, AppError> {
        let pool = self.level_repository.get_levels().await?;
        let round_level_ids = select_level_ids(&pool, ROUNDS_PER_GAME)?;
        debug!(round_count = round_level_ids.len(), "Rounds selected");

        for level_id in &round_level_ids {
            self.level_repository.increment_play_count(level_id).await?;
        }

        let game = GameModel::new(
            round_level_ids,
            request.time_allowed_per_round,
            request.game_type.unwrap_or_default(),
        );
        self.game_repository.create_game(&game).await?;

        info!(
            game_id = %game.id,
            game_type = %game.game_type,
            "Game created successfully"
        );

        Ok(game)
    }

    /// Provisions a shared weekly challenge game. Identical to a
    /// singleplayer game apart from the type tag; every participant plays
    /// the same round plan.
    #[instrument(skip(self))]
    pub async fn create_weekly_game(
        &self,
        time_allowed_per_round: Option<i64>,
    ) -> Result<GameModel, AppError> {
        self.create_new_game(CreateGameRequest {
            time_allowed_per_round,
            game_type: Some(GameType::Weekly),
        })
        .await
    }

    /// Gets a game by id for API endpoints
    #[instrument(skip(self))]
    pub async fn get_game(&self, game_id: &str) -> Result<GameModel, AppError> {
        self.game_repository
            .get_game(game_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Game not found".to_string()))
    }

    /// Evaluates a guess against a level's true location and returns the
    /// distance and round score. Read-only: round state is recorded
    /// separately, so a failed or retried check leaves nothing behind.
    #[instrument(skip(self))]
    pub async fn check_guess(
        &self,
        level_id: &str,
        guess_lat: f64,
        guess_lng: f64,
    ) -> Result<CheckGuessResponse, AppError> {
        let level = self
            .level_repository
            .get_level(level_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Level not found".to_string()))?;

        let result = evaluate_guess(level.latitude, level.longitude, guess_lat, guess_lng)?;

        debug!(
            level_id = %level_id,
            distance_feet = result.distance_feet,
            score = result.score,
            "Guess evaluated"
        );

        Ok(CheckGuessResponse {
            correct_lat: level.latitude,
            correct_lng: level.longitude,
            distance_away: result.distance_feet,
            score: result.score,
        })
    }
}
