// Public API
pub use models::LevelModel;
pub use repository::{InMemoryLevelRepository, LevelRepository};
pub use selector::{select_level_ids, SelectionError};

pub mod handlers;
pub mod models;
pub mod repository;
pub mod selector;
