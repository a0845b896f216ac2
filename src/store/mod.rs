use std::path::Path;

use serde::de::DeserializeOwned;

use crate::models::{Link, Movie, Rating, Tag};

pub mod cleaning;
pub mod loader;

pub use loader::LoadError;

use loader::{RawLink, RawMovie, RawRating, RawTag};

/// The four cleaned MovieLens relations
///
/// Built once, then shared read-only with every pipeline stage.
#[derive(Debug, Clone, Default)]
pub struct Store {
    pub links: Vec<Link>,
    pub movies: Vec<Movie>,
    pub ratings: Vec<Rating>,
    pub tags: Vec<Tag>,
}

impl Store {
    /// Loads and cleans links.csv, movies.csv, ratings.csv and tags.csv
    ///
    /// A file that can't be opened leaves its relation empty; the other
    /// relations still load.
    pub fn load(data_dir: &Path) -> Self {
        tracing::info!(data_dir = %data_dir.display(), "Loading dataset");

        let links: Vec<Link> = load_relation::<RawLink>(data_dir, loader::LINKS_FILE)
            .into_iter()
            .map(Link::from)
            .collect();

        let movies: Vec<Movie> = load_relation::<RawMovie>(data_dir, loader::MOVIES_FILE)
            .into_iter()
            .map(Movie::from)
            .collect();

        let ratings: Vec<Rating> = loader::convert_timestamped(
            load_relation::<RawRating>(data_dir, loader::RATINGS_FILE),
            "ratings",
        );

        let tags: Vec<Tag> = loader::convert_timestamped(
            load_relation::<RawTag>(data_dir, loader::TAGS_FILE),
            "tags",
        );

        let store = Self::from_parts(links, movies, ratings, tags);

        tracing::info!(
            links = store.links.len(),
            movies = store.movies.len(),
            ratings = store.ratings.len(),
            tags = store.tags.len(),
            "Dataset loaded"
        );

        store
    }

    /// Builds a store from typed relations, applying the cleaning rules
    pub fn from_parts(links: Vec<Link>, movies: Vec<Movie>, ratings: Vec<Rating>, tags: Vec<Tag>) -> Self {
        Self {
            links: cleaning::clean_links(links),
            movies: cleaning::clean_movies(movies),
            ratings: cleaning::clean_ratings(ratings),
            tags: cleaning::clean_tags(tags),
        }
    }
}

fn load_relation<T: DeserializeOwned>(data_dir: &Path, file: &str) -> Vec<T> {
    let path = data_dir.join(file);
    match loader::read_file::<T>(&path) {
        Ok(rows) => {
            tracing::debug!(file, rows = rows.len(), "Read relation");
            rows
        }
        Err(e) => {
            tracing::error!(file, error = %e, "Failed to read relation, continuing without it");
            Vec::new()
        }
    }
}
