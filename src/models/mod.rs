use serde::{Deserialize, Serialize};

pub mod movie;
pub mod rating;
pub mod recommendation;

pub use movie::{Link, Movie};
pub use rating::{Rating, Tag};
pub use recommendation::{RecommendedItem, Recommendations, SeenItem};

/// Identifier of a user, as found in the `userId` column
pub type UserId = u32;

/// Identifier of a movie, as found in the `movieId` column
pub type MovieId = u32;

/// Query parameters accepted by the recommendation endpoint
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RecommendationQuery {
    /// Number of unseen movies to return; falls back to the configured default
    pub top_k: Option<usize>,
}
