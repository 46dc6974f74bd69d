use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::game::models::GameType;
use crate::scoring::ROUNDS_PER_GAME;

/// Database model for the leaderboard entries table: the immutable record
/// of one completed game by one user. Exactly one entry may exist per
/// (game, user) pair; entries are never mutated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntryModel {
    pub id: String,
    pub game_id: String,
    pub user_id: String,
    pub scores: Vec<i64>,    // one per round, in round order
    pub distances: Vec<i64>, // raw feet, parallel to scores
    pub total_time_seconds: i64,
    pub xp_gained: i64,
    pub level_before: i64,
    pub level_after: i64,
    pub game_type: GameType,
    pub completed_at: DateTime<Utc>,
}

impl LeaderboardEntryModel {
    /// Creates a new entry with a generated ID
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        game_id: String,
        user_id: String,
        scores: [i64; ROUNDS_PER_GAME],
        distances: [i64; ROUNDS_PER_GAME],
        total_time_seconds: i64,
        xp_gained: i64,
        level_before: i64,
        level_after: i64,
        game_type: GameType,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            game_id,
            user_id,
            scores: scores.to_vec(),
            distances: distances.to_vec(),
            total_time_seconds,
            xp_gained,
            level_before,
            level_after,
            game_type,
            completed_at: Utc::now(),
        }
    }

    pub fn total_score(&self) -> i64 {
        self.scores.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entry_carries_round_data() {
        let entry = LeaderboardEntryModel::new(
            "game-1".to_string(),
            "user-1".to_string(),
            [250, 200, 0, 100, 50],
            [0, 70, 1000, 170, 220],
            95,
            34,
            1,
            2,
            GameType::Singleplayer,
        );

        assert!(!entry.id.is_empty());
        assert_eq!(entry.scores.len(), 5);
        assert_eq!(entry.distances.len(), 5);
        assert_eq!(entry.total_score(), 600);
    }
}
