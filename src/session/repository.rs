use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, instrument};

use super::models::OngoingGameModel;
use crate::shared::AppError;

/// Trait for ongoing-game repository operations
#[async_trait]
pub trait OngoingGameRepository {
    /// Creates or replaces the session for this (game, user) pair
    async fn upsert(&self, ongoing: &OngoingGameModel) -> Result<(), AppError>;

    async fn get(
        &self,
        game_id: &str,
        user_id: &str,
    ) -> Result<Option<OngoingGameModel>, AppError>;

    /// Deletes the session; returns whether one existed. Deleting an
    /// absent session is not an error so deletes can be retried.
    async fn delete(&self, game_id: &str, user_id: &str) -> Result<bool, AppError>;

    /// Deletes sessions untouched since `cutoff` (the abandonment sweep).
    /// Returns the number removed.
    async fn delete_idle_since(&self, cutoff: DateTime<Utc>) -> Result<u64, AppError>;
}

/// In-memory implementation of OngoingGameRepository for development and
/// testing
pub struct InMemoryOngoingGameRepository {
    sessions: Mutex<HashMap<(String, String), OngoingGameModel>>,
}

impl Default for InMemoryOngoingGameRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryOngoingGameRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the current number of stored sessions
    pub fn session_count(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }
}

#[async_trait]
impl OngoingGameRepository for InMemoryOngoingGameRepository {
    #[instrument(skip(self, ongoing))]
    async fn upsert(&self, ongoing: &OngoingGameModel) -> Result<(), AppError> {
        let key = (ongoing.game_id.clone(), ongoing.user_id.clone());

        let mut sessions = self.sessions.lock().unwrap();
        sessions.insert(key, ongoing.clone());

        debug!(
            game_id = %ongoing.game_id,
            user_id = %ongoing.user_id,
            current_round = ongoing.current_round,
            "Ongoing game saved"
        );
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get(
        &self,
        game_id: &str,
        user_id: &str,
    ) -> Result<Option<OngoingGameModel>, AppError> {
        let sessions = self.sessions.lock().unwrap();
        Ok(sessions
            .get(&(game_id.to_string(), user_id.to_string()))
            .cloned())
    }

    #[instrument(skip(self))]
    async fn delete(&self, game_id: &str, user_id: &str) -> Result<bool, AppError> {
        let mut sessions = self.sessions.lock().unwrap();
        let removed = sessions
            .remove(&(game_id.to_string(), user_id.to_string()))
            .is_some();

        debug!(game_id = %game_id, user_id = %user_id, removed = removed, "Ongoing game deleted");
        Ok(removed)
    }

    #[instrument(skip(self))]
    async fn delete_idle_since(&self, cutoff: DateTime<Utc>) -> Result<u64, AppError> {
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|_, session| session.updated_at >= cutoff);
        let removed = (before - sessions.len()) as u64;

        debug!(removed = removed, "Idle ongoing games swept");
        Ok(removed)
    }
}
