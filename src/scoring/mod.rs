// Public API
pub use errors::ScoringError;
pub use evaluator::{evaluate_guess, is_spot_on, GuessResult, MAX_ROUND_SCORE, SPOT_ON_FEET};
pub use xp::{compute_xp, level_for_total_xp, xp_to_advance, ROUNDS_PER_GAME};

// Internal modules
mod errors;
mod evaluator;
mod xp;
