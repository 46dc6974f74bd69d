// Experience awards for completed games and the level curve applied to a
// user's cumulative XP total.
use super::evaluator::is_spot_on;

/// Every game has exactly this many rounds
pub const ROUNDS_PER_GAME: usize = 5;

/// Flat XP for finishing a game, regardless of score
const GAME_COMPLETION_XP: i64 = 10;

/// One bonus XP per this many points scored
const POINTS_PER_BONUS_XP: i64 = 25;

/// Extra XP per Spot On round
const SPOT_ON_BONUS_XP: i64 = 5;

/// XP cost of each level-up grows by this much per level...
const LEVEL_UP_COST_STEP: i64 = 25;

/// ...until it reaches this flat per-level cost
const LEVEL_UP_COST_CAP: i64 = 100;

/// Computes the XP awarded for one completed game.
///
/// The award is a flat completion grant, plus one XP per 25 points scored,
/// plus 5 XP per Spot On round. A perfect game (all 5 rounds Spot On)
/// doubles the entire accumulated total, not just the bonus portion.
///
/// Pure and deterministic: identical inputs always produce identical awards.
pub fn compute_xp(scores: &[i64; ROUNDS_PER_GAME], distances: &[i64; ROUNDS_PER_GAME]) -> i64 {
    let total_points: i64 = scores.iter().sum();
    let spot_on_rounds = distances.iter().filter(|d| is_spot_on(**d)).count();

    let mut xp = GAME_COMPLETION_XP + total_points / POINTS_PER_BONUS_XP;
    xp += SPOT_ON_BONUS_XP * spot_on_rounds as i64;

    if spot_on_rounds == ROUNDS_PER_GAME {
        xp *= 2;
    }

    xp
}

/// XP required to advance from `level` to `level + 1`:
/// 25, 50, 75, 100, then a flat 100 per level thereafter.
pub fn xp_to_advance(level: i64) -> i64 {
    (LEVEL_UP_COST_STEP * level).min(LEVEL_UP_COST_CAP)
}

/// Recomputes a user's level from their cumulative XP total
pub fn level_for_total_xp(total_xp: i64) -> i64 {
    let mut level = 1;
    let mut remaining = total_xp;
    loop {
        let cost = xp_to_advance(level);
        if remaining < cost {
            return level;
        }
        remaining -= cost;
        level += 1;
    }
}
