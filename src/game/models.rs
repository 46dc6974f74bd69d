use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use uuid::Uuid;

use crate::scoring::ROUNDS_PER_GAME;

/// Closed set of game variants. The lifecycle does not branch on this,
/// it is carried for bookkeeping and display.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GameType {
    #[default]
    Singleplayer,
    Weekly,
    Multiplayer,
}

/// Database model for the games table: an immutable round plan.
///
/// After creation the only permitted mutations are setting the
/// first-played-by marker once and appending leaderboard entry references.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameModel {
    pub id: String,
    pub round_level_ids: Vec<String>, // always 5, pairwise distinct
    pub time_allowed_per_round: Option<i64>, // seconds, advisory only
    pub game_type: GameType,
    pub first_played_by: Option<String>,
    pub leaderboard_entry_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl GameModel {
    /// Creates a new game model with a generated ID
    pub fn new(
        round_level_ids: Vec<String>,
        time_allowed_per_round: Option<i64>,
        game_type: GameType,
    ) -> Self {
        debug_assert_eq!(round_level_ids.len(), ROUNDS_PER_GAME);

        Self {
            id: Uuid::new_v4().to_string(),
            round_level_ids,
            time_allowed_per_round,
            game_type,
            first_played_by: None,
            leaderboard_entry_ids: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Level id for a 1-based round number
    pub fn level_for_round(&self, round: usize) -> Option<&str> {
        if round == 0 {
            return None;
        }
        self.round_level_ids.get(round - 1).map(|id| id.as_str())
    }
}
