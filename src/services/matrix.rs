use std::collections::{BTreeSet, HashMap};

use ndarray::Array2;

use crate::models::{MovieId, Rating, UserId};

/// Bidirectional mapping between ids and dense matrix positions
///
/// Labels are kept in ascending id order, so ids need not be contiguous
/// or start at 1.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IdIndex {
    ids: Vec<u32>,
    positions: HashMap<u32, usize>,
}

impl IdIndex {
    pub fn new<I: IntoIterator<Item = u32>>(ids: I) -> Self {
        let ids: Vec<u32> = ids.into_iter().collect::<BTreeSet<_>>().into_iter().collect();
        let positions = ids.iter().enumerate().map(|(pos, &id)| (id, pos)).collect();
        Self { ids, positions }
    }

    /// Position of an id, if it is a label
    pub fn position(&self, id: u32) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    /// Id stored at a position
    pub fn id(&self, position: usize) -> Option<u32> {
        self.ids.get(position).copied()
    }

    pub fn ids(&self) -> &[u32] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Dense users × movies pivot of the Ratings relation
///
/// `None` marks an unobserved cell, which is distinct from any rating value.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingMatrix {
    pub users: IdIndex,
    pub items: IdIndex,
    pub cells: Array2<Option<f64>>,
}

impl RatingMatrix {
    /// Pivots ratings into a matrix
    ///
    /// Expects at most one rating per (user, movie); if that doesn't hold the
    /// last one wins. An empty slice yields an empty matrix.
    pub fn build(ratings: &[Rating]) -> Self {
        let users = IdIndex::new(ratings.iter().map(|r| r.user_id));
        let items = IdIndex::new(ratings.iter().map(|r| r.movie_id));
        let mut cells = Array2::from_elem((users.len(), items.len()), None);

        for rating in ratings {
            // Both lookups succeed: the indexes were built from these ratings
            if let (Some(row), Some(col)) = (users.position(rating.user_id), items.position(rating.movie_id)) {
                cells[[row, col]] = Some(rating.rating);
            }
        }

        Self { users, items, cells }
    }

    /// Observed rating of a movie by a user
    pub fn get(&self, user_id: UserId, movie_id: MovieId) -> Option<f64> {
        let row = self.users.position(user_id)?;
        let col = self.items.position(movie_id)?;
        self.cells[[row, col]]
    }

    /// (users, items)
    pub fn shape(&self) -> (usize, usize) {
        (self.users.len(), self.items.len())
    }

    pub fn observed_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Fraction of cells holding a rating
    pub fn density(&self) -> f64 {
        let total = self.cells.len();
        if total == 0 {
            0.0
        } else {
            self.observed_count() as f64 / total as f64
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
