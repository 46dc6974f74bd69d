use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ScoringError {
    #[error("{0}")]
    InvalidCoordinate(String),
}
