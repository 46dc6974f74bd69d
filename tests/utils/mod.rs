use std::sync::Arc;

use pantherguessr::game::repository::InMemoryGameRepository;
use pantherguessr::game::GameService;
use pantherguessr::leaderboard::repository::InMemoryLeaderboardRepository;
use pantherguessr::level::repository::{InMemoryLevelRepository, LevelRepository};
use pantherguessr::level::LevelModel;
use pantherguessr::session::repository::InMemoryOngoingGameRepository;
use pantherguessr::session::SessionService;
use pantherguessr::user::repository::{InMemoryUserRepository, UserRepository};
use pantherguessr::user::UserModel;

// Campus center used for generated test levels
pub const CAMPUS_LAT: f64 = 33.7934;
pub const CAMPUS_LNG: f64 = -117.8514;

// Roughly one foot of latitude in degrees
const LAT_DEGREES_PER_FOOT: f64 = 1.0 / 364_776.0;

/// Moves a latitude north by approximately the given number of feet
pub fn offset_north(latitude: f64, feet: f64) -> f64 {
    latitude + feet * LAT_DEGREES_PER_FOOT
}

// ============================================================================
// Test backend wiring
// ============================================================================

pub struct TestBackend {
    pub game_service: Arc<GameService>,
    pub session_service: Arc<SessionService>,
    pub level_repository: Arc<InMemoryLevelRepository>,
    pub game_repository: Arc<InMemoryGameRepository>,
    pub ongoing_repository: Arc<InMemoryOngoingGameRepository>,
    pub leaderboard_repository: Arc<InMemoryLeaderboardRepository>,
    pub user_repository: Arc<InMemoryUserRepository>,
}

pub struct TestBackendBuilder {
    levels: Vec<LevelModel>,
    user_ids: Vec<String>,
}

impl TestBackendBuilder {
    pub fn new() -> Self {
        Self {
            levels: Vec::new(),
            user_ids: Vec::new(),
        }
    }

    /// Seeds `count` levels spread across the campus, far enough apart
    /// that a guess at one never scores against another
    pub fn with_campus_levels(mut self, count: usize) -> Self {
        self.levels = (0..count)
            .map(|i| {
                LevelModel::new(
                    CAMPUS_LAT + i as f64 * 0.002,
                    CAMPUS_LNG - i as f64 * 0.002,
                    format!("photo-{}", i),
                )
            })
            .collect();
        self
    }

    pub fn with_user(mut self, user_id: &str) -> Self {
        self.user_ids.push(user_id.to_string());
        self
    }

    pub async fn build(self) -> TestBackend {
        let level_repository = Arc::new(InMemoryLevelRepository::new());
        for level in &self.levels {
            level_repository.create_level(level).await.unwrap();
        }

        let user_repository = Arc::new(InMemoryUserRepository::new());
        for user_id in &self.user_ids {
            user_repository
                .create_user(&UserModel::new(user_id.clone()))
                .await
                .unwrap();
        }

        let game_repository = Arc::new(InMemoryGameRepository::new());
        let ongoing_repository = Arc::new(InMemoryOngoingGameRepository::new());
        let leaderboard_repository = Arc::new(InMemoryLeaderboardRepository::new());

        let game_service = Arc::new(GameService::new(
            level_repository.clone(),
            game_repository.clone(),
        ));
        let session_service = Arc::new(SessionService::new(
            game_repository.clone(),
            ongoing_repository.clone(),
            leaderboard_repository.clone(),
            user_repository.clone(),
        ));

        TestBackend {
            game_service,
            session_service,
            level_repository,
            game_repository,
            ongoing_repository,
            leaderboard_repository,
            user_repository,
        }
    }
}

impl Default for TestBackendBuilder {
    fn default() -> Self {
        Self::new()
    }
}
