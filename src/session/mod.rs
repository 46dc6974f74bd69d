// Public API
pub use cleanup_task::{start_session_cleanup_task, SessionCleanupConfig};
pub use models::OngoingGameModel;
pub use repository::{InMemoryOngoingGameRepository, OngoingGameRepository};
pub use service::SessionService;

pub mod cleanup_task;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod types;
