use std::time::Instant;

use super::matrix::RatingMatrix;
use super::normalizer::NormalizedMatrix;
use super::predictor::PredictionMatrix;
use super::recommendations::{self, RecommendError};
use super::similarity::SimilarityMatrix;
use crate::models::{Recommendations, UserId};
use crate::store::Store;

/// Every matrix derived from one Ratings snapshot
///
/// Built in one pass and never mutated; a new snapshot needs a new pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline {
    pub ratings: RatingMatrix,
    pub normalized: NormalizedMatrix,
    pub similarity: SimilarityMatrix,
    pub predictions: PredictionMatrix,
}

impl Pipeline {
    /// Runs matrix construction, normalization, similarity and prediction
    pub fn build(store: &Store) -> Self {
        let start = Instant::now();

        if store.ratings.is_empty() {
            tracing::warn!("No ratings available, recommendations will be empty");
        }

        let ratings = RatingMatrix::build(&store.ratings);
        let (users, items) = ratings.shape();
        tracing::info!(
            users,
            items,
            observed = ratings.observed_count(),
            "Rating matrix built"
        );

        let normalized = NormalizedMatrix::from_ratings(&ratings);

        let stage = Instant::now();
        let similarity = SimilarityMatrix::from_normalized(&normalized);
        tracing::info!(
            items,
            elapsed_ms = stage.elapsed().as_millis(),
            "Similarity matrix computed"
        );

        let predictions = PredictionMatrix::predict(&normalized, &similarity);

        tracing::info!(
            processing_time_ms = start.elapsed().as_millis(),
            unweighted_items = predictions.unweighted_items.len(),
            "Pipeline built"
        );

        Self {
            ratings,
            normalized,
            similarity,
            predictions,
        }
    }

    /// Recommends unseen movies for a user of this snapshot
    pub fn recommend(
        &self,
        store: &Store,
        user_id: UserId,
        top_k: usize,
    ) -> Result<Recommendations, RecommendError> {
        recommendations::recommend(user_id, &self.predictions, &store.movies, &store.ratings, top_k)
    }
}
