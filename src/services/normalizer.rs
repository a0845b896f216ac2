use ndarray::{Array1, Array2, ArrayView1};

use super::matrix::{IdIndex, RatingMatrix};
use crate::models::{MovieId, UserId};

/// Ratings centered on each user's mean, with unobserved cells set to 0
///
/// A zero cell reads as "indifferent" rather than "missing"; the similarity
/// engine treats it as signal.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedMatrix {
    pub users: IdIndex,
    pub items: IdIndex,
    pub values: Array2<f64>,
    /// Mean observed rating per user row
    pub means: Array1<f64>,
}

impl NormalizedMatrix {
    pub fn from_ratings(matrix: &RatingMatrix) -> Self {
        let (n_users, n_items) = matrix.shape();
        let mut values = Array2::zeros((n_users, n_items));
        let mut means = Array1::zeros(n_users);

        for (row, cells) in matrix.cells.rows().into_iter().enumerate() {
            let observed: Vec<f64> = cells.iter().flatten().copied().collect();
            // Every built row has at least one rating; keep 0 otherwise
            let mean = if observed.is_empty() {
                0.0
            } else {
                observed.iter().sum::<f64>() / observed.len() as f64
            };
            means[row] = mean;

            for (col, cell) in cells.iter().enumerate() {
                if let Some(rating) = cell {
                    values[[row, col]] = rating - mean;
                }
            }
        }

        Self {
            users: matrix.users.clone(),
            items: matrix.items.clone(),
            values,
            means,
        }
    }

    /// Mean observed rating of a user
    pub fn mean(&self, user_id: UserId) -> Option<f64> {
        self.users.position(user_id).map(|row| self.means[row])
    }

    pub fn get(&self, user_id: UserId, movie_id: MovieId) -> Option<f64> {
        let row = self.users.position(user_id)?;
        let col = self.items.position(movie_id)?;
        Some(self.values[[row, col]])
    }

    pub fn row(&self, user_id: UserId) -> Option<ArrayView1<'_, f64>> {
        self.users.position(user_id).map(|row| self.values.row(row))
    }
}
