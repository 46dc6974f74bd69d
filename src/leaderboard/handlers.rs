use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{info, instrument};

use super::models::LeaderboardEntryModel;
use super::repository::LeaderboardRepository;
use crate::game::repository::GameRepository;
use crate::shared::{AppError, AppState};

/// HTTP handler for reading a game's leaderboard entries
///
/// GET /game/:game_id/leaderboard
#[instrument(name = "game_leaderboard", skip(state))]
pub async fn game_leaderboard(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Json<Vec<LeaderboardEntryModel>>, AppError> {
    // 404 for unknown games rather than an empty list
    state
        .game_repository
        .get_game(&game_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Game not found".to_string()))?;

    let entries = state
        .leaderboard_repository
        .get_entries_for_game(&game_id)
        .await?;

    info!(
        game_id = %game_id,
        entry_count = entries.len(),
        "Leaderboard entries listed"
    );

    Ok(Json(entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::models::{GameModel, GameType};
    use crate::game::repository::{GameRepository, InMemoryGameRepository};
    use crate::leaderboard::repository::{InMemoryLeaderboardRepository, LeaderboardRepository};
    use crate::shared::test_utils::AppStateBuilder;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use std::sync::Arc;
    use tower::ServiceExt; // for `oneshot`

    #[tokio::test]
    async fn test_game_leaderboard_handler() {
        let game_repo = Arc::new(InMemoryGameRepository::new());
        let leaderboard_repo = Arc::new(InMemoryLeaderboardRepository::new());

        let level_ids: Vec<String> = (0..5).map(|i| format!("level-{}", i)).collect();
        let game = GameModel::new(level_ids, None, GameType::Singleplayer);
        game_repo.create_game(&game).await.unwrap();

        let entry = LeaderboardEntryModel::new(
            game.id.clone(),
            "user-1".to_string(),
            [250, 0, 0, 0, 0],
            [0, 500, 500, 500, 500],
            60,
            20,
            1,
            1,
            GameType::Singleplayer,
        );
        leaderboard_repo.insert_entry_if_absent(&entry).await.unwrap();

        let state = AppStateBuilder::new()
            .with_game_repository(game_repo)
            .with_leaderboard_repository(leaderboard_repo)
            .build();
        let app = Router::new()
            .route(
                "/game/:game_id/leaderboard",
                axum::routing::get(game_leaderboard),
            )
            .with_state(state);

        let request = Request::builder()
            .method("GET")
            .uri(format!("/game/{}/leaderboard", game.id))
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let entries: Vec<LeaderboardEntryModel> = serde_json::from_slice(&body).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].user_id, "user-1");
    }

    #[tokio::test]
    async fn test_game_leaderboard_handler_unknown_game() {
        let state = AppStateBuilder::new().build();
        let app = Router::new()
            .route(
                "/game/:game_id/leaderboard",
                axum::routing::get(game_leaderboard),
            )
            .with_state(state);

        let request = Request::builder()
            .method("GET")
            .uri("/game/missing/leaderboard")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
