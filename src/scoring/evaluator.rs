// Guess evaluation: great-circle distance between the true location and the
// guessed one, then a linear score curve over the distance in feet.
use serde::{Deserialize, Serialize};

use super::errors::ScoringError;

const EARTH_RADIUS_MILES: f64 = 3958.8;
const FEET_PER_MILE: f64 = 5280.0;

/// Flat distance forgiven before the score curve applies
const LENIENCY_FEET: i64 = 20;

/// Best possible score for a single round
pub const MAX_ROUND_SCORE: i64 = 250;

/// A guess within this raw distance counts as "Spot On".
/// Note this is checked against the raw distance, not the lenient one.
pub const SPOT_ON_FEET: i64 = 20;

/// Outcome of evaluating a single guess against a level's true location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessResult {
    pub distance_feet: i64,
    pub score: i64,
}

/// Whether a raw distance qualifies for the Spot On precision bonus
pub fn is_spot_on(distance_feet: i64) -> bool {
    distance_feet <= SPOT_ON_FEET
}

fn validate_coordinate(label: &str, latitude: f64, longitude: f64) -> Result<(), ScoringError> {
    if !latitude.is_finite() || !longitude.is_finite() {
        return Err(ScoringError::InvalidCoordinate(format!(
            "{} coordinate must be finite, got ({}, {})",
            label, latitude, longitude
        )));
    }
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(ScoringError::InvalidCoordinate(format!(
            "{} latitude {} outside [-90, 90]",
            label, latitude
        )));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(ScoringError::InvalidCoordinate(format!(
            "{} longitude {} outside [-180, 180]",
            label, longitude
        )));
    }
    Ok(())
}

/// Great-circle distance in feet via the haversine formula, truncated to an
/// integer. The truncation (rather than rounding) is load-bearing: scores are
/// derived from this integer and must reproduce across implementations.
fn haversine_feet(true_lat: f64, true_lng: f64, guess_lat: f64, guess_lng: f64) -> i64 {
    let d_lat = (guess_lat - true_lat).to_radians();
    let d_lng = (guess_lng - true_lng).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + true_lat.to_radians().cos() * guess_lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let central_angle = 2.0 * a.sqrt().min(1.0).asin();

    let miles = EARTH_RADIUS_MILES * central_angle;
    (miles * FEET_PER_MILE) as i64
}

/// Evaluates a guess against a level's true location.
///
/// The score forgives the first 20 feet of distance, then loses one point
/// per foot down to zero: `score = max(0, 250 - max(0, distance - 20))`.
pub fn evaluate_guess(
    true_lat: f64,
    true_lng: f64,
    guess_lat: f64,
    guess_lng: f64,
) -> Result<GuessResult, ScoringError> {
    validate_coordinate("level", true_lat, true_lng)?;
    validate_coordinate("guess", guess_lat, guess_lng)?;

    let distance_feet = haversine_feet(true_lat, true_lng, guess_lat, guess_lng);
    let lenient_distance = (distance_feet - LENIENCY_FEET).max(0);
    let score = (MAX_ROUND_SCORE - lenient_distance).max(0);

    Ok(GuessResult {
        distance_feet,
        score,
    })
}
