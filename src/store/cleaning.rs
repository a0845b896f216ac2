//! Per-relation cleaning rules applied before anything reaches the pipeline.

use std::collections::{HashMap, HashSet};

use crate::models::{Link, Movie, MovieId, Rating, Tag, UserId};

/// Keeps the first link seen for each movie
pub fn clean_links(links: Vec<Link>) -> Vec<Link> {
    let total = links.len();
    let mut seen: HashSet<MovieId> = HashSet::new();
    let cleaned: Vec<Link> = links
        .into_iter()
        .filter(|link| seen.insert(link.movie_id))
        .collect();

    report("links", total, cleaned.len());
    cleaned
}

/// Keeps the first movie seen for each id
pub fn clean_movies(movies: Vec<Movie>) -> Vec<Movie> {
    let total = movies.len();
    let mut seen: HashSet<MovieId> = HashSet::new();
    let cleaned: Vec<Movie> = movies
        .into_iter()
        .filter(|movie| seen.insert(movie.movie_id))
        .collect();

    report("movies", total, cleaned.len());
    cleaned
}

/// Drops off-scale ratings and collapses duplicates per (user, movie)
///
/// When a user rated the same movie more than once the most recent rating
/// wins (the later row on equal timestamps). The survivor takes the position
/// of the first occurrence.
pub fn clean_ratings(ratings: Vec<Rating>) -> Vec<Rating> {
    let total = ratings.len();
    let mut positions: HashMap<(UserId, MovieId), usize> = HashMap::new();
    let mut cleaned: Vec<Rating> = Vec::with_capacity(total);
    let mut off_scale = 0usize;

    for rating in ratings {
        if !Rating::is_valid_score(rating.rating) {
            off_scale += 1;
            continue;
        }

        match positions.get(&(rating.user_id, rating.movie_id)) {
            Some(&idx) => {
                if rating.timestamp >= cleaned[idx].timestamp {
                    cleaned[idx] = rating;
                }
            }
            None => {
                positions.insert((rating.user_id, rating.movie_id), cleaned.len());
                cleaned.push(rating);
            }
        }
    }

    if off_scale > 0 {
        tracing::warn!(off_scale, "Dropped ratings outside the 0.5-5.0 half-star scale");
    }
    report("ratings", total, cleaned.len());
    cleaned
}

/// Trims and lowercases tag text, dropping blanks and exact duplicates
pub fn clean_tags(tags: Vec<Tag>) -> Vec<Tag> {
    let total = tags.len();
    let mut seen: HashSet<(UserId, MovieId, String)> = HashSet::new();
    let cleaned: Vec<Tag> = tags
        .into_iter()
        .filter_map(|mut tag| {
            tag.tag = tag.tag.trim().to_lowercase();
            if tag.tag.is_empty() {
                return None;
            }
            seen.insert((tag.user_id, tag.movie_id, tag.tag.clone()))
                .then_some(tag)
        })
        .collect();

    report("tags", total, cleaned.len());
    cleaned
}

fn report(relation: &'static str, before: usize, after: usize) {
    tracing::debug!(relation, before, after, removed = before - after, "Cleaned relation");
}
