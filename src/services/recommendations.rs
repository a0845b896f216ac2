use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use thiserror::Error;

use super::predictor::PredictionMatrix;
use crate::models::{Movie, MovieId, Rating, RecommendedItem, Recommendations, SeenItem, UserId};

/// Default number of recommendations per user
pub const DEFAULT_TOP_K: usize = 5;

/// Error types for the recommender
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecommendError {
    #[error("Unknown user: {0}")]
    UnknownUser(UserId),
}

/// Generates personalized watch recommendations
///
/// Returns the user's rating history (highest rating first) together with
/// the `top_k` unseen movies ranked by predicted score. Both sorts are
/// stable: ties keep rating-relation and movie-relation order respectively.
///
/// Only movies with a prediction column, i.e. rated by someone, are
/// candidates. An empty prediction matrix yields empty results for anyone.
pub fn recommend(
    user_id: UserId,
    predictions: &PredictionMatrix,
    movies: &[Movie],
    ratings: &[Rating],
    top_k: usize,
) -> Result<Recommendations, RecommendError> {
    if predictions.is_empty() {
        return Ok(Recommendations::empty(user_id));
    }

    let scores = predictions
        .row(user_id)
        .ok_or(RecommendError::UnknownUser(user_id))?;

    let movies_by_id: HashMap<MovieId, &Movie> = movies.iter().map(|m| (m.movie_id, m)).collect();

    let mut seen: Vec<SeenItem> = ratings
        .iter()
        .filter(|r| r.user_id == user_id)
        .map(|r| SeenItem::from_rating(r, movies_by_id.get(&r.movie_id).copied()))
        .collect();
    seen.sort_by(|a, b| descending(a.rating, b.rating));

    let seen_ids: HashSet<MovieId> = seen.iter().map(|s| s.movie_id).collect();

    let mut recommended: Vec<RecommendedItem> = movies
        .iter()
        .filter(|movie| !seen_ids.contains(&movie.movie_id))
        .filter_map(|movie| {
            let col = predictions.items.position(movie.movie_id)?;
            Some(RecommendedItem::new(movie, scores[col]))
        })
        .collect();
    let candidates = recommended.len();

    recommended.sort_by(|a, b| descending(a.prediction, b.prediction));
    recommended.truncate(top_k);

    tracing::debug!(
        user_id,
        seen = seen.len(),
        candidates,
        returned = recommended.len(),
        "Recommendations ranked"
    );

    Ok(Recommendations {
        user_id,
        seen,
        recommended,
    })
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
