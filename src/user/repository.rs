use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use super::models::{UserModel, XpAward};
use crate::scoring::level_for_total_xp;
use crate::shared::AppError;

/// Trait for user repository operations
#[async_trait]
pub trait UserRepository {
    async fn create_user(&self, user: &UserModel) -> Result<(), AppError>;
    async fn get_user(&self, user_id: &str) -> Result<Option<UserModel>, AppError>;

    /// Applies one completed game's award to a user profile as a single
    /// read-modify-write: adds XP and points, recomputes the level from the
    /// new cumulative XP, and advances the daily streak. Concurrent awards
    /// to the same user must not lose updates.
    async fn apply_game_award(
        &self,
        user_id: &str,
        xp_gained: i64,
        points_earned: i64,
        now: DateTime<Utc>,
    ) -> Result<XpAward, AppError>;

    /// Zeroes the streak of every user who has not played today or
    /// yesterday. Returns the number of streaks reset.
    async fn reset_stale_streaks(&self, now: DateTime<Utc>) -> Result<u64, AppError>;
}

/// In-memory implementation of UserRepository for development and testing
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<String, UserModel>>,
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryUserRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
        }
    }

    /// Creates an in-memory repository with pre-populated users
    pub fn with_users(users: Vec<UserModel>) -> Self {
        let mut user_map = HashMap::new();
        for user in users {
            user_map.insert(user.id.clone(), user);
        }

        Self {
            users: Mutex::new(user_map),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    #[instrument(skip(self, user))]
    async fn create_user(&self, user: &UserModel) -> Result<(), AppError> {
        debug!(user_id = %user.id, "Creating user in memory");

        let mut users = self.users.lock().unwrap();
        if users.contains_key(&user.id) {
            warn!(user_id = %user.id, "User already exists in memory");
            return Err(AppError::DatabaseError("User already exists".to_string()));
        }
        users.insert(user.id.clone(), user.clone());

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_user(&self, user_id: &str) -> Result<Option<UserModel>, AppError> {
        let users = self.users.lock().unwrap();
        Ok(users.get(user_id).cloned())
    }

    #[instrument(skip(self))]
    async fn apply_game_award(
        &self,
        user_id: &str,
        xp_gained: i64,
        points_earned: i64,
        now: DateTime<Utc>,
    ) -> Result<XpAward, AppError> {
        // The whole read-modify-write happens under one lock so that two
        // concurrent awards to the same user cannot clobber each other.
        let mut users = self.users.lock().unwrap();
        let user = match users.get_mut(user_id) {
            Some(user) => user,
            None => {
                warn!(user_id = %user_id, "User not found for XP award");
                return Err(AppError::NotFound("User not found".to_string()));
            }
        };

        let level_before = user.level;
        user.current_streak = user.next_streak(now);
        user.current_xp += xp_gained;
        user.total_points_earned += points_earned;
        user.level = level_for_total_xp(user.current_xp);
        user.last_played_at = Some(now);

        let award = XpAward {
            level_before,
            level_after: user.level,
            total_xp: user.current_xp,
        };

        info!(
            user_id = %user_id,
            xp_gained = xp_gained,
            level_before = award.level_before,
            level_after = award.level_after,
            "XP award applied"
        );

        Ok(award)
    }

    #[instrument(skip(self))]
    async fn reset_stale_streaks(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        let mut users = self.users.lock().unwrap();
        let mut reset_count = 0;

        for user in users.values_mut() {
            if user.streak_is_stale(now) {
                user.current_streak = 0;
                reset_count += 1;
            }
        }

        debug!(reset_count = reset_count, "Stale streaks reset");
        Ok(reset_count)
    }
}
