use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::models::LeaderboardEntryModel;
use crate::game::models::GameType;
use crate::shared::AppError;

/// Result of attempting to insert a leaderboard entry
#[derive(Debug, Clone)]
pub enum EntryInsertOutcome {
    /// The entry was stored; this caller finalized the game
    Created(LeaderboardEntryModel),
    /// An entry for this (game, user) pair already existed; the prior
    /// entry is returned unchanged
    AlreadyExists(LeaderboardEntryModel),
}

/// Trait for leaderboard repository operations
#[async_trait]
pub trait LeaderboardRepository {
    /// Atomically inserts the entry unless one already exists for the same
    /// (game, user) pair. This is the guard behind the at-most-one-entry
    /// invariant: two racing finalize calls cannot both create an entry.
    async fn insert_entry_if_absent(
        &self,
        entry: &LeaderboardEntryModel,
    ) -> Result<EntryInsertOutcome, AppError>;

    async fn get_entry(
        &self,
        game_id: &str,
        user_id: &str,
    ) -> Result<Option<LeaderboardEntryModel>, AppError>;

    async fn get_entries_for_game(
        &self,
        game_id: &str,
    ) -> Result<Vec<LeaderboardEntryModel>, AppError>;
}

/// In-memory implementation of LeaderboardRepository for development and
/// testing. Entries are keyed by (game, user) so the uniqueness invariant
/// is structural.
pub struct InMemoryLeaderboardRepository {
    entries: Mutex<HashMap<(String, String), LeaderboardEntryModel>>,
}

impl Default for InMemoryLeaderboardRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryLeaderboardRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the total number of stored entries
    pub fn entry_count(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

#[async_trait]
impl LeaderboardRepository for InMemoryLeaderboardRepository {
    #[instrument(skip(self, entry))]
    async fn insert_entry_if_absent(
        &self,
        entry: &LeaderboardEntryModel,
    ) -> Result<EntryInsertOutcome, AppError> {
        let key = (entry.game_id.clone(), entry.user_id.clone());

        // Check and insert under one lock so racing finalizes serialize here
        let mut entries = self.entries.lock().unwrap();
        if let Some(existing) = entries.get(&key) {
            debug!(
                game_id = %entry.game_id,
                user_id = %entry.user_id,
                existing_entry_id = %existing.id,
                "Entry already recorded for this game and user"
            );
            return Ok(EntryInsertOutcome::AlreadyExists(existing.clone()));
        }

        entries.insert(key, entry.clone());
        debug!(
            game_id = %entry.game_id,
            user_id = %entry.user_id,
            entry_id = %entry.id,
            "Leaderboard entry created"
        );

        Ok(EntryInsertOutcome::Created(entry.clone()))
    }

    #[instrument(skip(self))]
    async fn get_entry(
        &self,
        game_id: &str,
        user_id: &str,
    ) -> Result<Option<LeaderboardEntryModel>, AppError> {
        let entries = self.entries.lock().unwrap();
        Ok(entries
            .get(&(game_id.to_string(), user_id.to_string()))
            .cloned())
    }

    #[instrument(skip(self))]
    async fn get_entries_for_game(
        &self,
        game_id: &str,
    ) -> Result<Vec<LeaderboardEntryModel>, AppError> {
        let entries = self.entries.lock().unwrap();
        Ok(entries
            .values()
            .filter(|entry| entry.game_id == game_id)
            .cloned()
            .collect())
    }
}

/// PostgreSQL implementation of the leaderboard repository.
///
/// The uniqueness invariant is delegated to a UNIQUE (game_id, user_id)
/// constraint; the insert races resolve inside the database.
pub struct PostgresLeaderboardRepository {
    pool: PgPool,
}

impl PostgresLeaderboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn entry_from_row(row: &sqlx::postgres::PgRow) -> Result<LeaderboardEntryModel, AppError> {
        let game_type: String = row.get("game_type");
        let game_type = GameType::from_str(&game_type)
            .map_err(|e| AppError::DatabaseError(format!("Unknown game type: {}", e)))?;

        Ok(LeaderboardEntryModel {
            id: row.get("id"),
            game_id: row.get("game_id"),
            user_id: row.get("user_id"),
            scores: row.get("scores"),
            distances: row.get("distances"),
            total_time_seconds: row.get("total_time_seconds"),
            xp_gained: row.get("xp_gained"),
            level_before: row.get("level_before"),
            level_after: row.get("level_after"),
            game_type,
            completed_at: row.get("completed_at"),
        })
    }
}

#[async_trait]
impl LeaderboardRepository for PostgresLeaderboardRepository {
    #[instrument(skip(self, entry))]
    async fn insert_entry_if_absent(
        &self,
        entry: &LeaderboardEntryModel,
    ) -> Result<EntryInsertOutcome, AppError> {
        debug!(
            game_id = %entry.game_id,
            user_id = %entry.user_id,
            "Inserting leaderboard entry in database"
        );

        let result = sqlx::query(
            "INSERT INTO leaderboard_entries \
             (id, game_id, user_id, scores, distances, total_time_seconds, \
              xp_gained, level_before, level_after, game_type, completed_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             ON CONFLICT (game_id, user_id) DO NOTHING",
        )
        .bind(&entry.id)
        .bind(&entry.game_id)
        .bind(&entry.user_id)
        .bind(&entry.scores)
        .bind(&entry.distances)
        .bind(entry.total_time_seconds)
        .bind(entry.xp_gained)
        .bind(entry.level_before)
        .bind(entry.level_after)
        .bind(entry.game_type.to_string())
        .bind(entry.completed_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to insert leaderboard entry");
            AppError::DatabaseError(e.to_string())
        })?;

        if result.rows_affected() == 1 {
            return Ok(EntryInsertOutcome::Created(entry.clone()));
        }

        // Lost the race (or a retry): hand back the entry that won
        match self.get_entry(&entry.game_id, &entry.user_id).await? {
            Some(existing) => Ok(EntryInsertOutcome::AlreadyExists(existing)),
            None => Err(AppError::DatabaseError(
                "Entry insert conflicted but no existing entry found".to_string(),
            )),
        }
    }

    #[instrument(skip(self))]
    async fn get_entry(
        &self,
        game_id: &str,
        user_id: &str,
    ) -> Result<Option<LeaderboardEntryModel>, AppError> {
        let row = sqlx::query(
            "SELECT id, game_id, user_id, scores, distances, total_time_seconds, \
             xp_gained, level_before, level_after, game_type, completed_at \
             FROM leaderboard_entries WHERE game_id = $1 AND user_id = $2",
        )
        .bind(game_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, game_id = %game_id, "Failed to fetch leaderboard entry");
            AppError::DatabaseError(e.to_string())
        })?;

        match row {
            Some(row) => Ok(Some(Self::entry_from_row(&row)?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    async fn get_entries_for_game(
        &self,
        game_id: &str,
    ) -> Result<Vec<LeaderboardEntryModel>, AppError> {
        let rows = sqlx::query(
            "SELECT id, game_id, user_id, scores, distances, total_time_seconds, \
             xp_gained, level_before, level_after, game_type, completed_at \
             FROM leaderboard_entries WHERE game_id = $1 ORDER BY completed_at",
        )
        .bind(game_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, game_id = %game_id, "Failed to fetch leaderboard entries");
            AppError::DatabaseError(e.to_string())
        })?;

        rows.iter().map(Self::entry_from_row).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entry(game_id: &str, user_id: &str) -> LeaderboardEntryModel {
        LeaderboardEntryModel::new(
            game_id.to_string(),
            user_id.to_string(),
            [250, 250, 250, 0, 0],
            [0, 0, 0, 1000, 1000],
            120,
            55,
            1,
            2,
            GameType::Singleplayer,
        )
    }

    #[tokio::test]
    async fn test_insert_and_get_entry() {
        let repo = InMemoryLeaderboardRepository::new();
        let entry = sample_entry("game-1", "user-1");

        let outcome = repo.insert_entry_if_absent(&entry).await.unwrap();
        assert!(matches!(outcome, EntryInsertOutcome::Created(_)));

        let retrieved = repo.get_entry("game-1", "user-1").await.unwrap().unwrap();
        assert_eq!(retrieved.id, entry.id);
        assert_eq!(retrieved.xp_gained, 55);
    }

    #[tokio::test]
    async fn test_second_insert_returns_first_entry() {
        let repo = InMemoryLeaderboardRepository::new();
        let first = sample_entry("game-1", "user-1");
        let second = sample_entry("game-1", "user-1");

        repo.insert_entry_if_absent(&first).await.unwrap();
        let outcome = repo.insert_entry_if_absent(&second).await.unwrap();

        match outcome {
            EntryInsertOutcome::AlreadyExists(existing) => assert_eq!(existing.id, first.id),
            other => panic!("expected AlreadyExists, got {:?}", other),
        }

        assert_eq!(repo.entry_count(), 1);
    }

    #[tokio::test]
    async fn test_same_user_different_games_both_insert() {
        let repo = InMemoryLeaderboardRepository::new();

        repo.insert_entry_if_absent(&sample_entry("game-1", "user-1"))
            .await
            .unwrap();
        let outcome = repo
            .insert_entry_if_absent(&sample_entry("game-2", "user-1"))
            .await
            .unwrap();

        assert!(matches!(outcome, EntryInsertOutcome::Created(_)));
        assert_eq!(repo.entry_count(), 2);
    }

    #[tokio::test]
    async fn test_entries_for_game_filters_by_game() {
        let repo = InMemoryLeaderboardRepository::new();

        repo.insert_entry_if_absent(&sample_entry("game-1", "user-1"))
            .await
            .unwrap();
        repo.insert_entry_if_absent(&sample_entry("game-1", "user-2"))
            .await
            .unwrap();
        repo.insert_entry_if_absent(&sample_entry("game-2", "user-1"))
            .await
            .unwrap();

        let entries = repo.get_entries_for_game("game-1").await.unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.game_id == "game-1"));
    }

    #[tokio::test]
    async fn test_concurrent_inserts_create_exactly_one_entry() {
        let repo = std::sync::Arc::new(InMemoryLeaderboardRepository::new());

        let handles = (0..8)
            .map(|_| {
                let repo = std::sync::Arc::clone(&repo);
                tokio::spawn(async move {
                    let entry = sample_entry("game-1", "user-1");
                    repo.insert_entry_if_absent(&entry).await
                })
            })
            .collect::<Vec<_>>();

        let outcomes = futures::future::join_all(handles).await;
        let created = outcomes
            .into_iter()
            .map(|o| o.unwrap().unwrap())
            .filter(|o| matches!(o, EntryInsertOutcome::Created(_)))
            .count();

        assert_eq!(created, 1, "exactly one finalize may create the entry");
        assert_eq!(repo.entry_count(), 1);
    }
}
