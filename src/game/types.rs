use serde::{Deserialize, Serialize};

use super::models::{GameModel, GameType};

/// Request payload for creating a new game
#[derive(Debug, Deserialize)]
pub struct CreateGameRequest {
    pub time_allowed_per_round: Option<i64>,
    pub game_type: Option<GameType>,
}

/// Response for game creation
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateGameResponse {
    pub game_id: String,
}

/// Full game details returned to the front end
#[derive(Debug, Serialize, Deserialize)]
pub struct GameResponse {
    pub id: String,
    pub round_level_ids: Vec<String>,
    pub time_allowed_per_round: Option<i64>,
    pub game_type: GameType,
    pub first_played_by: Option<String>,
    pub leaderboard_entry_ids: Vec<String>,
}

impl From<GameModel> for GameResponse {
    fn from(game: GameModel) -> Self {
        Self {
            id: game.id,
            round_level_ids: game.round_level_ids,
            time_allowed_per_round: game.time_allowed_per_round,
            game_type: game.game_type,
            first_played_by: game.first_played_by,
            leaderboard_entry_ids: game.leaderboard_entry_ids,
        }
    }
}

/// Request payload for checking a guess against a level
#[derive(Debug, Deserialize)]
pub struct CheckGuessRequest {
    pub level_id: String,
    pub guess_lat: f64,
    pub guess_lng: f64,
}

/// Response for a checked guess: the true location plus the round result
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckGuessResponse {
    pub correct_lat: f64,
    pub correct_lng: f64,
    pub distance_away: i64,
    pub score: i64,
}
