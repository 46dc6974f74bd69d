use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{error, info, instrument};

use super::repository::OngoingGameRepository;

/// Configuration for the abandoned-session cleanup task
#[derive(Debug, Clone)]
pub struct SessionCleanupConfig {
    /// How often to run the sweep
    pub cleanup_interval: Duration,
    /// How long a session must sit untouched before deletion
    pub abandoned_threshold: Duration,
}

impl Default for SessionCleanupConfig {
    fn default() -> Self {
        Self {
            cleanup_interval: Duration::from_secs(30 * 60), // 30 minutes
            abandoned_threshold: Duration::from_secs(24 * 60 * 60), // 24 hours
        }
    }
}

/// Starts the background task that periodically removes abandoned ongoing
/// games. Finished games are removed at finalize; this sweep only catches
/// sessions that were started and walked away from.
#[instrument(skip(ongoing_game_repository))]
pub async fn start_session_cleanup_task(
    ongoing_game_repository: Arc<dyn OngoingGameRepository + Send + Sync>,
    config: SessionCleanupConfig,
) {
    info!(
        cleanup_interval_secs = config.cleanup_interval.as_secs(),
        abandoned_threshold_secs = config.abandoned_threshold.as_secs(),
        "Starting session cleanup background task"
    );

    let mut cleanup_interval = interval(config.cleanup_interval);

    loop {
        cleanup_interval.tick().await;

        let cutoff = chrono::Utc::now()
            - chrono::Duration::from_std(config.abandoned_threshold)
                .unwrap_or_else(|_| chrono::Duration::hours(24));

        match ongoing_game_repository.delete_idle_since(cutoff).await {
            Ok(removed) => {
                if removed > 0 {
                    info!(removed = removed, "Abandoned sessions cleaned up");
                }
            }
            Err(e) => {
                error!(error = %e, "Session cleanup task failed");
            }
        }
    }
}
