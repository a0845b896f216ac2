use ndarray::{Array1, Array2, Axis};

use super::matrix::IdIndex;
use super::normalizer::NormalizedMatrix;
use crate::models::MovieId;

/// Item × item cosine similarity of normalized rating columns
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    pub items: IdIndex,
    pub values: Array2<f64>,
}

impl SimilarityMatrix {
    /// Computes pairwise cosine similarity between every pair of movie columns
    ///
    /// A column with zero norm has similarity 0 with everything, itself
    /// included, instead of an undefined value.
    pub fn from_normalized(normalized: &NormalizedMatrix) -> Self {
        let columns = &normalized.values;
        let gram = columns.t().dot(columns);
        let norms: Array1<f64> = gram.diag().mapv(f64::sqrt);

        let n_items = norms.len();
        let mut values = Array2::zeros((n_items, n_items));

        for i in 0..n_items {
            if norms[i] == 0.0 {
                continue;
            }
            for j in i..n_items {
                if norms[j] == 0.0 {
                    continue;
                }
                let cosine = (gram[[i, j]] / (norms[i] * norms[j])).clamp(-1.0, 1.0);
                values[[i, j]] = cosine;
                values[[j, i]] = cosine;
            }
        }

        let degenerate = norms.iter().filter(|&&n| n == 0.0).count();
        if degenerate > 0 {
            tracing::debug!(degenerate, "Zero-norm item columns given similarity 0");
        }

        Self {
            items: normalized.items.clone(),
            values,
        }
    }

    pub fn get(&self, movie_a: MovieId, movie_b: MovieId) -> Option<f64> {
        let i = self.items.position(movie_a)?;
        let j = self.items.position(movie_b)?;
        Some(self.values[[i, j]])
    }

    /// Total similarity weight available to each movie column
    pub fn column_weights(&self) -> Array1<f64> {
        self.values.sum_axis(Axis(0))
    }

    /// Movies whose column is all zeros
    pub fn degenerate_items(&self) -> Vec<MovieId> {
        self.values
            .columns()
            .into_iter()
            .enumerate()
            .filter(|(_, column)| column.iter().all(|&v| v == 0.0))
            .filter_map(|(pos, _)| self.items.id(pos))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Rating, UserId};
    use crate::services::matrix::RatingMatrix;
    use chrono::{DateTime, Utc};

    const EPS: f64 = 1e-9;

    fn rating(user_id: UserId, movie_id: MovieId, score: f64) -> Rating {
        Rating {
            user_id,
            movie_id,
            rating: score,
            timestamp: DateTime::<Utc>::from_timestamp(0, 0).unwrap(),
        }
    }

    fn similarity(ratings: &[Rating]) -> SimilarityMatrix {
        let normalized = NormalizedMatrix::from_ratings(&RatingMatrix::build(ratings));
        SimilarityMatrix::from_normalized(&normalized)
    }

    fn sample() -> Vec<Rating> {
        vec![
            rating(1, 1, 5.0),
            rating(1, 2, 3.0),
            rating(1, 3, 4.0),
            rating(2, 1, 4.0),
            rating(2, 3, 2.0),
            rating(3, 2, 5.0),
            rating(3, 4, 1.0),
            rating(4, 1, 2.0),
            rating(4, 4, 4.5),
        ]
    }

    #[test]
    fn test_symmetric() {
        let sim = similarity(&sample());
        let n = sim.items.len();
        for i in 0..n {
            for j in 0..n {
                assert!((sim.values[[i, j]] - sim.values[[j, i]]).abs() < EPS);
            }
        }
    }

    #[test]
    fn test_values_in_range() {
        let sim = similarity(&sample());
        assert!(sim.values.iter().all(|v| v.is_finite() && (-1.0..=1.0).contains(v)));
    }

    #[test]
    fn test_diagonal_is_one_for_nonzero_columns() {
        let sim = similarity(&sample());
        for &movie in sim.items.ids() {
            assert!((sim.get(movie, movie).unwrap() - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn test_known_cosine() {
        // Columns after centering: movie 1 = [1, 1, 0], movie 2 = [-1, 0, 2]
        let ratings = vec![
            rating(1, 1, 5.0),
            rating(1, 2, 3.0),
            rating(2, 1, 4.0),
            rating(2, 3, 2.0),
            rating(3, 2, 5.0),
            rating(3, 4, 1.0),
        ];
        let sim = similarity(&ratings);
        let expected = -1.0 / 10f64.sqrt();
        assert!((sim.get(1, 2).unwrap() - expected).abs() < EPS);
        assert!((sim.get(1, 4).unwrap()).abs() < EPS);
    }

    #[test]
    fn test_zero_column_yields_zero_not_nan() {
        // Movie 3 is rated at each rater's own mean, so its column centers to zero
        let ratings = vec![
            rating(1, 1, 5.0),
            rating(1, 2, 1.0),
            rating(1, 3, 3.0),
            rating(2, 3, 4.0),
        ];
        let sim = similarity(&ratings);

        for &movie in sim.items.ids() {
            let value = sim.get(3, movie).unwrap();
            assert_eq!(value, 0.0);
            assert!(!value.is_nan());
        }
        assert_eq!(sim.degenerate_items(), vec![3]);
    }

    #[test]
    fn test_column_weights_include_diagonal() {
        let sim = similarity(&sample());
        let weights = sim.column_weights();
        for (pos, &weight) in weights.iter().enumerate() {
            let manual: f64 = sim.values.column(pos).sum();
            assert!((weight - manual).abs() < EPS);
        }
    }

    #[test]
    fn test_empty_input() {
        let sim = similarity(&[]);
        assert!(sim.values.is_empty());
        assert!(sim.degenerate_items().is_empty());
    }
}
