use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{error, info, instrument};

use super::repository::UserRepository;

/// Configuration for the daily streak reset task
#[derive(Debug, Clone)]
pub struct StreakResetConfig {
    /// How often to check for stale streaks
    pub check_interval: Duration,
}

impl Default for StreakResetConfig {
    fn default() -> Self {
        Self {
            check_interval: Duration::from_secs(60 * 60), // hourly
        }
    }
}

/// Starts the background task that zeroes streaks for users who did not
/// play today or yesterday
#[instrument(skip(user_repository))]
pub async fn start_streak_reset_task(
    user_repository: Arc<dyn UserRepository + Send + Sync>,
    config: StreakResetConfig,
) {
    info!(
        check_interval_secs = config.check_interval.as_secs(),
        "Starting streak reset background task"
    );

    let mut check_interval = interval(config.check_interval);

    loop {
        check_interval.tick().await;

        match user_repository.reset_stale_streaks(chrono::Utc::now()).await {
            Ok(reset_count) => {
                if reset_count > 0 {
                    info!(reset_count = reset_count, "Streak reset sweep completed");
                }
            }
            Err(e) => {
                error!(error = %e, "Streak reset sweep failed");
            }
        }
    }
}
