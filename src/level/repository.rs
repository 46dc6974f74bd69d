use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::models::LevelModel;
use crate::shared::AppError;

/// Trait for level repository operations
#[async_trait]
pub trait LevelRepository {
    async fn create_level(&self, level: &LevelModel) -> Result<(), AppError>;
    async fn get_levels(&self) -> Result<Vec<LevelModel>, AppError>;
    async fn get_level(&self, level_id: &str) -> Result<Option<LevelModel>, AppError>;

    /// Bumps the play counter for a level that was just dealt into a game.
    /// The counter is monotonic; there is no decrement.
    async fn increment_play_count(&self, level_id: &str) -> Result<(), AppError>;
}

/// In-memory implementation of LevelRepository for development and testing
pub struct InMemoryLevelRepository {
    levels: Mutex<HashMap<String, LevelModel>>,
}

impl Default for InMemoryLevelRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryLevelRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            levels: Mutex::new(HashMap::new()),
        }
    }

    /// Creates an in-memory repository with a pre-populated level pool
    pub fn with_levels(levels: Vec<LevelModel>) -> Self {
        let mut level_map = HashMap::new();
        for level in levels {
            level_map.insert(level.id.clone(), level);
        }

        Self {
            levels: Mutex::new(level_map),
        }
    }

    /// Returns the current pool size
    pub fn level_count(&self) -> usize {
        self.levels.lock().unwrap().len()
    }
}

#[async_trait]
impl LevelRepository for InMemoryLevelRepository {
    #[instrument(skip(self, level))]
    async fn create_level(&self, level: &LevelModel) -> Result<(), AppError> {
        debug!(level_id = %level.id, "Creating level in memory");

        let mut levels = self.levels.lock().unwrap();
        if levels.contains_key(&level.id) {
            warn!(level_id = %level.id, "Level already exists in memory");
            return Err(AppError::DatabaseError("Level already exists".to_string()));
        }
        levels.insert(level.id.clone(), level.clone());

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_levels(&self) -> Result<Vec<LevelModel>, AppError> {
        let levels = self.levels.lock().unwrap();
        Ok(levels.values().cloned().collect())
    }

    #[instrument(skip(self))]
    async fn get_level(&self, level_id: &str) -> Result<Option<LevelModel>, AppError> {
        let levels = self.levels.lock().unwrap();
        Ok(levels.get(level_id).cloned())
    }

    #[instrument(skip(self))]
    async fn increment_play_count(&self, level_id: &str) -> Result<(), AppError> {
        let mut levels = self.levels.lock().unwrap();
        match levels.get_mut(level_id) {
            Some(level) => {
                level.play_count += 1;
                debug!(level_id = %level_id, play_count = level.play_count, "Play count incremented");
                Ok(())
            }
            None => {
                warn!(level_id = %level_id, "Level not found for play count increment");
                Err(AppError::NotFound("Level not found".to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_level(image_id: &str) -> LevelModel {
        LevelModel::new(33.7934, -117.8514, image_id.to_string())
    }

    #[tokio::test]
    async fn test_create_and_get_level() {
        let repo = InMemoryLevelRepository::new();
        let level = sample_level("img-1");

        repo.create_level(&level).await.unwrap();

        let retrieved = repo.get_level(&level.id).await.unwrap();
        assert!(retrieved.is_some());
        assert_eq!(retrieved.unwrap().image_id, "img-1");
    }

    #[tokio::test]
    async fn test_get_nonexistent_level() {
        let repo = InMemoryLevelRepository::new();

        let result = repo.get_level("missing").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_create_duplicate_level() {
        let repo = InMemoryLevelRepository::new();
        let level = sample_level("img-1");

        repo.create_level(&level).await.unwrap();
        let result = repo.create_level(&level).await;

        assert!(matches!(result.unwrap_err(), AppError::DatabaseError(_)));
    }

    #[tokio::test]
    async fn test_play_count_is_monotonic() {
        let repo = InMemoryLevelRepository::new();
        let level = sample_level("img-1");
        repo.create_level(&level).await.unwrap();

        repo.increment_play_count(&level.id).await.unwrap();
        repo.increment_play_count(&level.id).await.unwrap();

        let retrieved = repo.get_level(&level.id).await.unwrap().unwrap();
        assert_eq!(retrieved.play_count, 2);
    }

    #[tokio::test]
    async fn test_increment_missing_level_errors() {
        let repo = InMemoryLevelRepository::new();

        let result = repo.increment_play_count("missing").await;
        assert!(matches!(result.unwrap_err(), AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_with_levels_seeds_pool() {
        let repo = InMemoryLevelRepository::with_levels(vec![
            sample_level("img-1"),
            sample_level("img-2"),
            sample_level("img-3"),
        ]);

        assert_eq!(repo.level_count(), 3);
        assert_eq!(repo.get_levels().await.unwrap().len(), 3);
    }
}
