// Public API
pub use models::LeaderboardEntryModel;
pub use repository::{
    EntryInsertOutcome, InMemoryLeaderboardRepository, LeaderboardRepository,
    PostgresLeaderboardRepository,
};

pub mod handlers;
pub mod models;
pub mod repository;
