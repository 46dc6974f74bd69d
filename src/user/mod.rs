// Public API
pub use models::{UserModel, XpAward};
pub use repository::{InMemoryUserRepository, UserRepository};
pub use streak_task::{start_streak_reset_task, StreakResetConfig};

pub mod models;
pub mod repository;
pub mod streak_task;
