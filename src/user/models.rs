use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Database model for the game-relevant slice of a user profile
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct UserModel {
    pub id: String, // external identity id, always passed in explicitly
    pub level: i64,
    pub current_xp: i64, // cumulative, never decreases
    pub current_streak: i64,
    pub total_points_earned: i64,
    pub last_played_at: Option<DateTime<Utc>>,
}

/// Result of applying one game's XP award to a user profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XpAward {
    pub level_before: i64,
    pub level_after: i64,
    pub total_xp: i64,
}

impl UserModel {
    /// Creates a fresh profile at level 1 with no plays recorded
    pub fn new(id: String) -> Self {
        Self {
            id,
            level: 1,
            current_xp: 0,
            current_streak: 0,
            total_points_earned: 0,
            last_played_at: None,
        }
    }

    /// Streak value after a play at `now`: a play on the same calendar day
    /// keeps the streak, the next day extends it, any gap restarts at 1.
    pub fn next_streak(&self, now: DateTime<Utc>) -> i64 {
        let today = now.date_naive();
        match self.last_played_at {
            None => 1,
            Some(last) => {
                let last_day = last.date_naive();
                if today == last_day {
                    self.current_streak.max(1)
                } else if today == last_day + Duration::days(1) {
                    self.current_streak + 1
                } else {
                    1
                }
            }
        }
    }

    /// Whether the user's streak is stale as of `now` (no play today or
    /// yesterday), making it eligible for the daily reset sweep
    pub fn streak_is_stale(&self, now: DateTime<Utc>) -> bool {
        if self.current_streak == 0 {
            return false;
        }
        match self.last_played_at {
            None => true,
            Some(last) => {
                let today = now.date_naive();
                let last_day = last.date_naive();
                last_day != today && last_day != today - Duration::days(1)
            }
        }
    }
}
