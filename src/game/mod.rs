// Public API
pub use models::{GameModel, GameType};
pub use repository::{GameRepository, InMemoryGameRepository};
pub use service::GameService;

pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod types;
