use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Movie, MovieId, Rating, UserId};

/// A movie the user already rated, joined with its metadata when known
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeenItem {
    pub movie_id: MovieId,
    pub rating: f64,
    pub timestamp: DateTime<Utc>,
    pub title: Option<String>,
    pub year: Option<i32>,
    pub genres: Option<BTreeSet<String>>,
}

impl SeenItem {
    /// Left-joins a rating with the matching movie, if any
    pub fn from_rating(rating: &Rating, movie: Option<&Movie>) -> Self {
        Self {
            movie_id: rating.movie_id,
            rating: rating.rating,
            timestamp: rating.timestamp,
            title: movie.map(|m| m.title.clone()),
            year: movie.and_then(|m| m.year),
            genres: movie.map(|m| m.genres.clone()),
        }
    }
}

/// An unseen movie ranked by its predicted preference score
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendedItem {
    pub movie_id: MovieId,
    pub title: String,
    pub year: Option<i32>,
    pub genres: BTreeSet<String>,
    pub prediction: f64,
}

impl RecommendedItem {
    pub fn new(movie: &Movie, prediction: f64) -> Self {
        Self {
            movie_id: movie.movie_id,
            title: movie.title.clone(),
            year: movie.year,
            genres: movie.genres.clone(),
            prediction,
        }
    }
}

/// Result of a recommendation call: rating history plus ranked candidates
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendations {
    pub user_id: UserId,
    /// Rated movies, highest rating first
    pub seen: Vec<SeenItem>,
    /// Unseen movies, highest prediction first
    pub recommended: Vec<RecommendedItem>,
}

impl Recommendations {
    pub fn empty(user_id: UserId) -> Self {
        Self {
            user_id,
            seen: Vec::new(),
            recommended: Vec::new(),
        }
    }
}
