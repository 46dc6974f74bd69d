use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::game::models::GameType;
use crate::scoring::ROUNDS_PER_GAME;
use crate::shared::AppError;

/// Database model for resumable game sessions.
///
/// `current_round` is 1-based; a value of 6 means all five rounds are done
/// and the session is waiting to be finalized. The scores and distances
/// lists grow in lockstep, one pair per completed round, so both always
/// hold `current_round - 1` items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OngoingGameModel {
    pub game_id: String,
    pub user_id: String,
    pub current_round: i64,
    pub scores: Vec<i64>,
    pub distances: Vec<i64>,
    pub total_time_seconds: i64,
    pub game_type: GameType,
    pub updated_at: DateTime<Utc>,
}

impl OngoingGameModel {
    /// Creates a fresh session at round 1 with nothing recorded
    pub fn new(game_id: String, user_id: String, game_type: GameType) -> Self {
        Self {
            game_id,
            user_id,
            current_round: 1,
            scores: Vec::new(),
            distances: Vec::new(),
            total_time_seconds: 0,
            game_type,
            updated_at: Utc::now(),
        }
    }

    /// All five rounds have been played
    pub fn is_complete(&self) -> bool {
        self.current_round as usize > ROUNDS_PER_GAME
    }

    pub fn rounds_recorded(&self) -> usize {
        self.scores.len()
    }

    /// The progression invariant: both round lists hold exactly one item
    /// per completed round
    pub fn holds_round_invariant(&self) -> bool {
        self.current_round >= 1
            && self.current_round as usize <= ROUNDS_PER_GAME + 1
            && self.scores.len() == self.distances.len()
            && self.scores.len() == (self.current_round - 1) as usize
    }

    /// Appends one round's result and advances to the next round.
    /// Rejected once the session is complete; a failed append leaves the
    /// session untouched so the round can be retried.
    pub fn record_round(
        &mut self,
        score: i64,
        distance_feet: i64,
        total_time_seconds: i64,
    ) -> Result<(), AppError> {
        if self.is_complete() {
            return Err(AppError::Validation(
                "All rounds already played for this game".to_string(),
            ));
        }

        self.scores.push(score);
        self.distances.push(distance_feet);
        self.current_round += 1;
        self.total_time_seconds = total_time_seconds;
        self.updated_at = Utc::now();

        debug_assert!(self.holds_round_invariant());
        Ok(())
    }
}
