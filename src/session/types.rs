use serde::{Deserialize, Serialize};

use crate::game::models::GameType;

/// Request payload for saving resumable progress
/// (creates the session on first save)
#[derive(Debug, Deserialize)]
pub struct SaveProgressRequest {
    pub user_id: String,
    pub current_round: i64,
    pub scores: Vec<i64>,
    pub distances: Vec<i64>,
    pub total_time_seconds: i64,
    pub game_type: Option<GameType>,
}

/// Request payload for finalizing a completed game
#[derive(Debug, Deserialize)]
pub struct FinalizeRequest {
    pub user_id: String,
    pub scores: Vec<i64>,
    pub distances: Vec<i64>,
    pub total_time_seconds: i64,
}

/// Response for a finalized game
#[derive(Debug, Serialize, Deserialize)]
pub struct FinalizeResponse {
    pub entry_id: String,
    pub xp_gained: i64,
    pub level_before: i64,
    pub level_after: i64,
    /// True when this call found an entry from an earlier finalize and
    /// returned it instead of creating a new one
    pub already_recorded: bool,
}

/// Response for deleting an ongoing game
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteOngoingResponse {
    pub deleted: bool,
}
