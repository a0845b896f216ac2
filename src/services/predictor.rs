use ndarray::{Array2, ArrayView1, Axis};

use super::matrix::IdIndex;
use super::normalizer::NormalizedMatrix;
use super::similarity::SimilarityMatrix;
use crate::models::{MovieId, UserId};

/// Total similarity weights at or below this magnitude count as zero
pub const WEIGHT_EPSILON: f64 = 1e-12;

/// Dense predicted preference for every (user, movie) pair
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionMatrix {
    pub users: IdIndex,
    pub items: IdIndex,
    pub values: Array2<f64>,
    /// Movies whose total similarity weight was zero; their predictions are 0
    pub unweighted_items: Vec<MovieId>,
}

impl PredictionMatrix {
    /// Projects normalized ratings through the similarity matrix
    ///
    /// `P = N · S`, with each column divided by that movie's total similarity
    /// weight. A column with no weight is filled with 0.
    pub fn predict(normalized: &NormalizedMatrix, similarity: &SimilarityMatrix) -> Self {
        let mut values = normalized.values.dot(&similarity.values);
        let weights = similarity.column_weights();
        let mut unweighted_items = Vec::new();

        for (pos, (mut column, &weight)) in values.axis_iter_mut(Axis(1)).zip(weights.iter()).enumerate() {
            if weight.abs() <= WEIGHT_EPSILON {
                column.fill(0.0);
                if let Some(movie_id) = similarity.items.id(pos) {
                    unweighted_items.push(movie_id);
                }
            } else {
                column /= weight;
            }
        }

        if !unweighted_items.is_empty() {
            tracing::debug!(
                count = unweighted_items.len(),
                "Movies with zero similarity weight predicted as 0"
            );
        }

        Self {
            users: normalized.users.clone(),
            items: normalized.items.clone(),
            values,
            unweighted_items,
        }
    }

    pub fn get(&self, user_id: UserId, movie_id: MovieId) -> Option<f64> {
        let row = self.users.position(user_id)?;
        let col = self.items.position(movie_id)?;
        Some(self.values[[row, col]])
    }

    pub fn row(&self, user_id: UserId) -> Option<ArrayView1<'_, f64>> {
        self.users.position(user_id).map(|row| self.values.row(row))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Rating;
    use crate::services::matrix::RatingMatrix;
    use chrono::{DateTime, Utc};

    fn rating(user_id: UserId, movie_id: MovieId, score: f64) -> Rating {
        Rating {
            user_id,
            movie_id,
            rating: score,
            timestamp: DateTime::<Utc>::from_timestamp(0, 0).unwrap(),
        }
    }

    fn predict(ratings: &[Rating]) -> PredictionMatrix {
        let normalized = NormalizedMatrix::from_ratings(&RatingMatrix::build(ratings));
        let similarity = SimilarityMatrix::from_normalized(&normalized);
        PredictionMatrix::predict(&normalized, &similarity)
    }

    #[test]
    fn test_weighted_average_of_normalized_ratings() {
        let ratings = vec![
            rating(1, 1, 5.0),
            rating(1, 2, 3.0),
            rating(2, 1, 4.0),
            rating(2, 3, 2.0),
            rating(3, 2, 5.0),
            rating(3, 4, 1.0),
        ];
        let predictions = predict(&ratings);

        // Column 3 weight: 1 - 1/sqrt(2); user 1 contributes 1 * -1/sqrt(2)
        let s13 = -1.0 / 2f64.sqrt();
        let expected_c = s13 / (1.0 + s13);
        assert!((predictions.get(1, 3).unwrap() - expected_c).abs() < 1e-9);

        // Column 4 weight: 1 - 2/sqrt(5); user 1 contributes -1 * -2/sqrt(5)
        let s24 = -2.0 / 5f64.sqrt();
        let expected_d = -s24 / (1.0 + s24);
        assert!((predictions.get(1, 4).unwrap() - expected_d).abs() < 1e-9);
    }

    #[test]
    fn test_dense_and_finite() {
        let ratings = vec![
            rating(1, 1, 5.0),
            rating(1, 2, 1.0),
            rating(1, 3, 3.0),
            rating(2, 3, 4.0),
            rating(2, 1, 2.0),
        ];
        let predictions = predict(&ratings);
        assert_eq!(predictions.values.dim(), (2, 3));
        assert!(predictions.values.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_zero_weight_column_predicts_zero() {
        // Every rater gives movie 3 their own mean, so nothing is similar to it
        let ratings = vec![
            rating(1, 1, 5.0),
            rating(1, 2, 1.0),
            rating(1, 3, 3.0),
            rating(1, 4, 3.0),
            rating(2, 1, 4.0),
            rating(2, 3, 3.0),
            rating(2, 4, 2.0),
        ];
        let predictions = predict(&ratings);

        assert_eq!(predictions.unweighted_items, vec![3]);
        assert_eq!(predictions.get(1, 3), Some(0.0));
        assert_eq!(predictions.get(2, 3), Some(0.0));
    }

    #[test]
    fn test_unknown_ids() {
        let predictions = predict(&[rating(1, 1, 4.0)]);
        assert!(predictions.get(2, 1).is_none());
        assert!(predictions.get(1, 2).is_none());
        assert!(predictions.row(2).is_none());
    }

    #[test]
    fn test_empty_input() {
        let predictions = predict(&[]);
        assert!(predictions.is_empty());
        assert!(predictions.unweighted_items.is_empty());
    }
}
