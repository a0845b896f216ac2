use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::MovieId;

/// Marker MovieLens uses for movies without any genre
pub const NO_GENRES: &str = "(no genres listed)";

/// A movie and its display metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub movie_id: MovieId,
    pub title: String,
    /// Release year parsed from a trailing `(YYYY)` in the title
    pub year: Option<i32>,
    /// Lowercase genre tags; only used for display
    pub genres: BTreeSet<String>,
}

impl Movie {
    /// Creates a movie from raw `movies.csv` fields
    ///
    /// Trims the title, extracts the release year and splits the
    /// `|`-separated genre list into a lowercase set.
    pub fn new(movie_id: MovieId, title: &str, genres: &str) -> Self {
        let title = title.trim().to_string();
        let year = parse_year(&title);

        Self {
            movie_id,
            title,
            year,
            genres: parse_genres(genres),
        }
    }
}

/// Cross references from a movie to external databases
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Link {
    pub movie_id: MovieId,
    /// IMDb id digits as written in `links.csv` (e.g., "0114709")
    pub imdb_id: Option<String>,
    pub tmdb_id: Option<u32>,
}

fn parse_year(title: &str) -> Option<i32> {
    let inner = title.strip_suffix(')')?;
    let open = inner.rfind('(')?;
    let candidate = &inner[open + 1..];

    if candidate.len() == 4 && candidate.chars().all(|c| c.is_ascii_digit()) {
        candidate.parse().ok()
    } else {
        None
    }
}

fn parse_genres(raw: &str) -> BTreeSet<String> {
    raw.split('|')
        .map(|genre| genre.trim().to_lowercase())
        .filter(|genre| !genre.is_empty() && genre != NO_GENRES)
        .collect()
}
