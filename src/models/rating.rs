use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{MovieId, UserId};

/// Lowest rating accepted on the MovieLens scale
pub const MIN_RATING: f64 = 0.5;

/// Highest rating accepted on the MovieLens scale
pub const MAX_RATING: f64 = 5.0;

/// Granularity of the rating scale
pub const RATING_STEP: f64 = 0.5;

/// A single explicit rating of a movie by a user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rating {
    pub user_id: UserId,
    pub movie_id: MovieId,
    pub rating: f64,
    pub timestamp: DateTime<Utc>,
}

impl Rating {
    /// Checks the value lies on the half-star scale between 0.5 and 5.0
    pub fn is_valid_score(score: f64) -> bool {
        if !(MIN_RATING..=MAX_RATING).contains(&score) {
            return false;
        }
        let steps = score / RATING_STEP;
        (steps - steps.round()).abs() < 1e-9
    }
}

/// Free-text tag a user attached to a movie
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    pub user_id: UserId,
    pub movie_id: MovieId,
    pub tag: String,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_scores() {
        for score in [0.5, 1.0, 2.5, 4.5, 5.0] {
            assert!(Rating::is_valid_score(score), "{} should be valid", score);
        }
    }

    #[test]
    fn test_invalid_scores() {
        for score in [0.0, 5.5, 3.3, -1.0, f64::NAN] {
            assert!(!Rating::is_valid_score(score), "{} should be invalid", score);
        }
    }
}
