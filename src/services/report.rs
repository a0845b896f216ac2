use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::pipeline::Pipeline;
use crate::models::rating::RATING_STEP;
use crate::store::Store;

/// Descriptive statistics of the loaded dataset and the built matrices
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Summary {
    pub links: usize,
    pub movies: usize,
    pub ratings: usize,
    pub tags: usize,
    pub users: usize,
    pub rated_movies: usize,
    pub mean_rating: Option<f64>,
    /// Number of ratings per half-star value, keyed like "3.5"
    pub rating_histogram: BTreeMap<String, usize>,
    pub first_rating_at: Option<DateTime<Utc>>,
    pub last_rating_at: Option<DateTime<Utc>>,
    /// Observed cells over all cells of the rating matrix
    pub matrix_density: f64,
    /// Movies whose normalized column is all zeros
    pub degenerate_items: usize,
    /// Movies whose total similarity weight is zero
    pub unweighted_items: usize,
}

impl Summary {
    pub fn from_store(store: &Store, pipeline: &Pipeline) -> Self {
        let ratings = &store.ratings;

        let users: HashSet<_> = ratings.iter().map(|r| r.user_id).collect();
        let rated_movies: HashSet<_> = ratings.iter().map(|r| r.movie_id).collect();

        let mean_rating = if ratings.is_empty() {
            None
        } else {
            Some(ratings.iter().map(|r| r.rating).sum::<f64>() / ratings.len() as f64)
        };

        let mut rating_histogram = BTreeMap::new();
        for rating in ratings {
            let bucket = (rating.rating / RATING_STEP).round() * RATING_STEP;
            *rating_histogram.entry(format!("{:.1}", bucket)).or_insert(0) += 1;
        }

        Self {
            links: store.links.len(),
            movies: store.movies.len(),
            ratings: ratings.len(),
            tags: store.tags.len(),
            users: users.len(),
            rated_movies: rated_movies.len(),
            mean_rating,
            rating_histogram,
            first_rating_at: ratings.iter().map(|r| r.timestamp).min(),
            last_rating_at: ratings.iter().map(|r| r.timestamp).max(),
            matrix_density: pipeline.ratings.density(),
            degenerate_items: pipeline.similarity.degenerate_items().len(),
            unweighted_items: pipeline.predictions.unweighted_items.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Link, Movie, MovieId, Rating, Tag, UserId};

    fn rating(user_id: UserId, movie_id: MovieId, score: f64, seconds: i64) -> Rating {
        Rating {
            user_id,
            movie_id,
            rating: score,
            timestamp: DateTime::from_timestamp(seconds, 0).unwrap(),
        }
    }

    #[test]
    fn test_summary_counts() {
        let store = Store::from_parts(
            vec![Link {
                movie_id: 1,
                imdb_id: Some("0114709".to_string()),
                tmdb_id: Some(862),
            }],
            vec![
                Movie::new(1, "Toy Story (1995)", "Animation"),
                Movie::new(2, "Jumanji (1995)", "Adventure"),
                Movie::new(3, "Heat (1995)", "Action"),
            ],
            vec![
                rating(1, 1, 4.0, 300),
                rating(1, 2, 3.5, 100),
                rating(2, 1, 4.0, 200),
            ],
            vec![Tag {
                user_id: 1,
                movie_id: 1,
                tag: "pixar".to_string(),
                timestamp: DateTime::from_timestamp(400, 0).unwrap(),
            }],
        );
        let pipeline = Pipeline::build(&store);
        let summary = Summary::from_store(&store, &pipeline);

        assert_eq!(summary.links, 1);
        assert_eq!(summary.movies, 3);
        assert_eq!(summary.ratings, 3);
        assert_eq!(summary.tags, 1);
        assert_eq!(summary.users, 2);
        assert_eq!(summary.rated_movies, 2);
        assert!((summary.mean_rating.unwrap() - 11.5 / 3.0).abs() < 1e-12);
        assert_eq!(summary.rating_histogram.get("4.0"), Some(&2));
        assert_eq!(summary.rating_histogram.get("3.5"), Some(&1));
        assert_eq!(summary.first_rating_at.unwrap().timestamp(), 100);
        assert_eq!(summary.last_rating_at.unwrap().timestamp(), 300);
        assert!((summary.matrix_density - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_summary_of_empty_store() {
        let store = Store::default();
        let summary = Summary::from_store(&store, &Pipeline::build(&store));
        assert_eq!(summary.ratings, 0);
        assert_eq!(summary.mean_rating, None);
        assert!(summary.rating_histogram.is_empty());
        assert_eq!(summary.matrix_density, 0.0);
    }
}
