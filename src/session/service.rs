use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::{
    models::OngoingGameModel,
    repository::OngoingGameRepository,
    types::{FinalizeRequest, FinalizeResponse, SaveProgressRequest},
};
use crate::{
    game::repository::GameRepository,
    leaderboard::{
        models::LeaderboardEntryModel,
        repository::{EntryInsertOutcome, LeaderboardRepository},
    },
    scoring::{compute_xp, ROUNDS_PER_GAME},
    shared::AppError,
    user::repository::UserRepository,
};

/// Service driving a game session from first guess to its permanent
/// leaderboard entry.
///
/// Progress saves keep a resumable OngoingGame per (game, user) pair;
/// finalize turns five rounds of results into an XP award and exactly one
/// LeaderboardEntry, no matter how often it is retried.
pub struct SessionService {
    game_repository: Arc<dyn GameRepository + Send + Sync>,
    ongoing_game_repository: Arc<dyn OngoingGameRepository + Send + Sync>,
    leaderboard_repository: Arc<dyn LeaderboardRepository + Send + Sync>,
    user_repository: Arc<dyn UserRepository + Send + Sync>,
}

impl SessionService {
    pub fn new(
        game_repository: Arc<dyn GameRepository + Send + Sync>,
        ongoing_game_repository: Arc<dyn OngoingGameRepository + Send + Sync>,
        leaderboard_repository: Arc<dyn LeaderboardRepository + Send + Sync>,
        user_repository: Arc<dyn UserRepository + Send + Sync>,
    ) -> Self {
        Self {
            game_repository,
            ongoing_game_repository,
            leaderboard_repository,
            user_repository,
        }
    }

    /// Creates or updates the resumable session for a (game, user) pair.
    ///
    /// The round lists must match the claimed round, and a save can never
    /// move a session backwards; a rejected save leaves the stored state
    /// untouched so the client can retry.
    #[instrument(skip(self, request))]
    pub async fn save_progress(
        &self,
        game_id: &str,
        request: SaveProgressRequest,
    ) -> Result<OngoingGameModel, AppError> {
        let game = self
            .game_repository
            .get_game(game_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Game not found".to_string()))?;

        if request.current_round < 1 || request.current_round as usize > ROUNDS_PER_GAME + 1 {
            return Err(AppError::Validation(format!(
                "Round {} outside 1..={}",
                request.current_round,
                ROUNDS_PER_GAME + 1
            )));
        }

        let ongoing = OngoingGameModel {
            game_id: game_id.to_string(),
            user_id: request.user_id.clone(),
            current_round: request.current_round,
            scores: request.scores,
            distances: request.distances,
            total_time_seconds: request.total_time_seconds,
            game_type: request.game_type.unwrap_or(game.game_type),
            updated_at: Utc::now(),
        };

        if !ongoing.holds_round_invariant() {
            return Err(AppError::Validation(format!(
                "Expected {} recorded rounds for round {}, got {} scores and {} distances",
                ongoing.current_round - 1,
                ongoing.current_round,
                ongoing.scores.len(),
                ongoing.distances.len()
            )));
        }

        if let Some(existing) = self
            .ongoing_game_repository
            .get(game_id, &request.user_id)
            .await?
        {
            if ongoing.current_round < existing.current_round {
                return Err(AppError::Validation(format!(
                    "Session already at round {}, cannot move back to round {}",
                    existing.current_round, ongoing.current_round
                )));
            }
        }

        self.ongoing_game_repository.upsert(&ongoing).await?;

        info!(
            game_id = %game_id,
            user_id = %ongoing.user_id,
            current_round = ongoing.current_round,
            "Progress saved"
        );

        Ok(ongoing)
    }

    /// Gets the resumable session for a (game, user) pair, if any
    #[instrument(skip(self))]
    pub async fn get_ongoing(
        &self,
        game_id: &str,
        user_id: &str,
    ) -> Result<Option<OngoingGameModel>, AppError> {
        self.ongoing_game_repository.get(game_id, user_id).await
    }

    /// Discards the resumable session for a (game, user) pair
    #[instrument(skip(self))]
    pub async fn delete_ongoing(&self, game_id: &str, user_id: &str) -> Result<bool, AppError> {
        let deleted = self.ongoing_game_repository.delete(game_id, user_id).await?;
        debug!(game_id = %game_id, user_id = %user_id, deleted = deleted, "Ongoing game discarded");
        Ok(deleted)
    }

    /// Finalizes a completed game into a permanent leaderboard entry.
    ///
    /// On the first call for a (game, user) pair this computes the XP
    /// award, applies it to the user profile, stores the entry, deletes
    /// the resumable session, marks the game's first player, and appends
    /// the entry reference to the game. Any later call returns the
    /// existing entry unchanged.
    ///
    /// The entry insert is the idempotency guard; the steps after it are
    /// not covered by a cross-record transaction, so a crash between them
    /// can leave the tail steps undone. The entry uniqueness invariant
    /// holds regardless.
    #[instrument(skip(self, request))]
    pub async fn finalize(
        &self,
        game_id: &str,
        request: FinalizeRequest,
    ) -> Result<FinalizeResponse, AppError> {
        let game = self
            .game_repository
            .get_game(game_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Game not found".to_string()))?;

        let scores = round_array(&request.scores, "scores")?;
        let distances = round_array(&request.distances, "distances")?;

        // Retried finalize: hand back the entry the first call created
        if let Some(existing) = self
            .leaderboard_repository
            .get_entry(game_id, &request.user_id)
            .await?
        {
            info!(
                game_id = %game_id,
                user_id = %request.user_id,
                entry_id = %existing.id,
                "Finalize retried, returning existing entry"
            );
            return Ok(already_recorded_response(existing));
        }

        let xp_gained = compute_xp(&scores, &distances);
        let points_earned: i64 = scores.iter().sum();

        let award = self
            .user_repository
            .apply_game_award(&request.user_id, xp_gained, points_earned, Utc::now())
            .await?;

        let entry = LeaderboardEntryModel::new(
            game_id.to_string(),
            request.user_id.clone(),
            scores,
            distances,
            request.total_time_seconds,
            xp_gained,
            award.level_before,
            award.level_after,
            game.game_type,
        );

        let entry = match self
            .leaderboard_repository
            .insert_entry_if_absent(&entry)
            .await?
        {
            EntryInsertOutcome::Created(entry) => entry,
            EntryInsertOutcome::AlreadyExists(existing) => {
                // A concurrent finalize won the insert race; keep its entry
                warn!(
                    game_id = %game_id,
                    user_id = %request.user_id,
                    entry_id = %existing.id,
                    "Concurrent finalize already recorded this game"
                );
                return Ok(already_recorded_response(existing));
            }
        };

        self.ongoing_game_repository
            .delete(game_id, &request.user_id)
            .await?;
        self.game_repository
            .set_first_played_by(game_id, &request.user_id)
            .await?;
        self.game_repository
            .append_leaderboard_entry(game_id, &entry.id)
            .await?;

        info!(
            game_id = %game_id,
            user_id = %request.user_id,
            entry_id = %entry.id,
            xp_gained = xp_gained,
            level_before = entry.level_before,
            level_after = entry.level_after,
            "Game finalized"
        );

        Ok(FinalizeResponse {
            entry_id: entry.id,
            xp_gained: entry.xp_gained,
            level_before: entry.level_before,
            level_after: entry.level_after,
            already_recorded: false,
        })
    }
}

fn round_array(values: &[i64], label: &str) -> Result<[i64; ROUNDS_PER_GAME], AppError> {
    <[i64; ROUNDS_PER_GAME]>::try_from(values).map_err(|_| {
        AppError::Validation(format!(
            "Expected {} {}, got {}",
            ROUNDS_PER_GAME,
            label,
            values.len()
        ))
    })
}

fn already_recorded_response(entry: LeaderboardEntryModel) -> FinalizeResponse {
    FinalizeResponse {
        entry_id: entry.id,
        xp_gained: entry.xp_gained,
        level_before: entry.level_before,
        level_after: entry.level_after,
        already_recorded: true,
    }
}
