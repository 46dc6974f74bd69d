// Library crate for the PantherGuessr game backend
// This file exposes the public API for integration tests

pub mod game;
pub mod leaderboard;
pub mod level;
pub mod scoring;
pub mod session;
pub mod shared;
pub mod user;

// Re-export commonly used types for easier access in tests
pub use game::{GameModel, GameService, GameType};
pub use leaderboard::{LeaderboardEntryModel, LeaderboardRepository};
pub use level::{LevelModel, LevelRepository};
pub use scoring::{compute_xp, evaluate_guess, level_for_total_xp, GuessResult};
pub use session::{OngoingGameModel, SessionService};
pub use shared::{AppError, AppState};
pub use user::{UserModel, UserRepository};
