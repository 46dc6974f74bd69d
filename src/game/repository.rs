use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use super::models::GameModel;
use crate::shared::AppError;

/// Trait for game repository operations
#[async_trait]
pub trait GameRepository {
    async fn create_game(&self, game: &GameModel) -> Result<(), AppError>;
    async fn get_game(&self, game_id: &str) -> Result<Option<GameModel>, AppError>;

    /// Sets the informational first-played marker. The first caller wins;
    /// later callers are a silent no-op, never an error.
    async fn set_first_played_by(&self, game_id: &str, user_id: &str) -> Result<(), AppError>;

    /// Appends a leaderboard entry reference to the game's entry list
    async fn append_leaderboard_entry(
        &self,
        game_id: &str,
        entry_id: &str,
    ) -> Result<(), AppError>;
}

/// In-memory implementation of GameRepository for development and testing
pub struct InMemoryGameRepository {
    games: Mutex<HashMap<String, GameModel>>,
}

impl Default for InMemoryGameRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryGameRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            games: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl GameRepository for InMemoryGameRepository {
    #[instrument(skip(self, game))]
    async fn create_game(&self, game: &GameModel) -> Result<(), AppError> {
        debug!(game_id = %game.id, game_type = %game.game_type, "Creating game in memory");

        let mut games = self.games.lock().unwrap();
        if games.contains_key(&game.id) {
            warn!(game_id = %game.id, "Game already exists in memory");
            return Err(AppError::DatabaseError("Game already exists".to_string()));
        }
        games.insert(game.id.clone(), game.clone());

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_game(&self, game_id: &str) -> Result<Option<GameModel>, AppError> {
        let games = self.games.lock().unwrap();
        Ok(games.get(game_id).cloned())
    }

    #[instrument(skip(self))]
    async fn set_first_played_by(&self, game_id: &str, user_id: &str) -> Result<(), AppError> {
        let mut games = self.games.lock().unwrap();
        let game = match games.get_mut(game_id) {
            Some(game) => game,
            None => {
                warn!(game_id = %game_id, "Game not found for first-played marker");
                return Err(AppError::NotFound("Game not found".to_string()));
            }
        };

        if game.first_played_by.is_none() {
            game.first_played_by = Some(user_id.to_string());
            info!(game_id = %game_id, user_id = %user_id, "First-played marker set");
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn append_leaderboard_entry(
        &self,
        game_id: &str,
        entry_id: &str,
    ) -> Result<(), AppError> {
        let mut games = self.games.lock().unwrap();
        let game = match games.get_mut(game_id) {
            Some(game) => game,
            None => {
                warn!(game_id = %game_id, "Game not found for leaderboard append");
                return Err(AppError::NotFound("Game not found".to_string()));
            }
        };

        game.leaderboard_entry_ids.push(entry_id.to_string());
        debug!(
            game_id = %game_id,
            entry_id = %entry_id,
            entry_count = game.leaderboard_entry_ids.len(),
            "Leaderboard entry reference appended"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::models::GameType;

    fn sample_game() -> GameModel {
        let level_ids: Vec<String> = (0..5).map(|i| format!("level-{}", i)).collect();
        GameModel::new(level_ids, None, GameType::Singleplayer)
    }

    #[tokio::test]
    async fn test_create_and_get_game() {
        let repo = InMemoryGameRepository::new();
        let game = sample_game();

        repo.create_game(&game).await.unwrap();

        let retrieved = repo.get_game(&game.id).await.unwrap();
        assert!(retrieved.is_some());
        assert_eq!(retrieved.unwrap().round_level_ids.len(), 5);
    }

    #[tokio::test]
    async fn test_first_played_marker_is_set_once() {
        let repo = InMemoryGameRepository::new();
        let game = sample_game();
        repo.create_game(&game).await.unwrap();

        repo.set_first_played_by(&game.id, "alice").await.unwrap();
        // Second setter is a no-op, not an error
        repo.set_first_played_by(&game.id, "bob").await.unwrap();

        let retrieved = repo.get_game(&game.id).await.unwrap().unwrap();
        assert_eq!(retrieved.first_played_by, Some("alice".to_string()));
    }

    #[tokio::test]
    async fn test_append_leaderboard_entries_preserves_order() {
        let repo = InMemoryGameRepository::new();
        let game = sample_game();
        repo.create_game(&game).await.unwrap();

        repo.append_leaderboard_entry(&game.id, "entry-1")
            .await
            .unwrap();
        repo.append_leaderboard_entry(&game.id, "entry-2")
            .await
            .unwrap();

        let retrieved = repo.get_game(&game.id).await.unwrap().unwrap();
        assert_eq!(
            retrieved.leaderboard_entry_ids,
            vec!["entry-1".to_string(), "entry-2".to_string()]
        );
    }

    #[tokio::test]
    async fn test_markers_on_missing_game_error() {
        let repo = InMemoryGameRepository::new();

        let result = repo.set_first_played_by("missing", "alice").await;
        assert!(matches!(result.unwrap_err(), AppError::NotFound(_)));

        let result = repo.append_leaderboard_entry("missing", "entry-1").await;
        assert!(matches!(result.unwrap_err(), AppError::NotFound(_)));
    }
}
