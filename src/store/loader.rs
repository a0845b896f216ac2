use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::models::{Link, Movie, MovieId, Rating, Tag, UserId};

pub const LINKS_FILE: &str = "links.csv";
pub const MOVIES_FILE: &str = "movies.csv";
pub const RATINGS_FILE: &str = "ratings.csv";
pub const TAGS_FILE: &str = "tags.csv";

/// Error types for reading a relation file
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("Failed to read header of {}: {source}", .path.display())]
    Header {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

// Row layouts of the MovieLens files

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLink {
    pub movie_id: MovieId,
    #[serde(default)]
    pub imdb_id: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub tmdb_id: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMovie {
    pub movie_id: MovieId,
    pub title: String,
    #[serde(default)]
    pub genres: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRating {
    pub user_id: UserId,
    pub movie_id: MovieId,
    pub rating: f64,
    pub timestamp: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTag {
    pub user_id: UserId,
    pub movie_id: MovieId,
    pub tag: String,
    pub timestamp: i64,
}

impl From<RawLink> for Link {
    fn from(raw: RawLink) -> Self {
        Link {
            movie_id: raw.movie_id,
            imdb_id: raw.imdb_id.filter(|id| !id.is_empty()),
            tmdb_id: raw.tmdb_id,
        }
    }
}

impl From<RawMovie> for Movie {
    fn from(raw: RawMovie) -> Self {
        Movie::new(raw.movie_id, &raw.title, &raw.genres)
    }
}

impl TryFrom<RawRating> for Rating {
    type Error = i64;

    /// Fails with the offending value when the timestamp is out of range
    fn try_from(raw: RawRating) -> Result<Self, Self::Error> {
        Ok(Rating {
            user_id: raw.user_id,
            movie_id: raw.movie_id,
            rating: raw.rating,
            timestamp: to_datetime(raw.timestamp)?,
        })
    }
}

impl TryFrom<RawTag> for Tag {
    type Error = i64;

    fn try_from(raw: RawTag) -> Result<Self, Self::Error> {
        Ok(Tag {
            user_id: raw.user_id,
            movie_id: raw.movie_id,
            tag: raw.tag,
            timestamp: to_datetime(raw.timestamp)?,
        })
    }
}

fn to_datetime(seconds: i64) -> Result<DateTime<Utc>, i64> {
    DateTime::from_timestamp(seconds, 0).ok_or(seconds)
}

/// Reads every well-formed row of a CSV file
///
/// Rows that fail to deserialize are skipped and reported; only failures to
/// open the file or read its header are errors.
pub fn read_file<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, LoadError> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;

    read_records(reader, path)
}

/// Same as [`read_file`] for an in-memory or streamed source
pub fn read_from<T: DeserializeOwned, R: Read>(source: R, label: &Path) -> Result<Vec<T>, LoadError> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source);

    read_records(reader, label)
}

fn read_records<T: DeserializeOwned, R: Read>(
    mut reader: csv::Reader<R>,
    path: &Path,
) -> Result<Vec<T>, LoadError> {
    reader.headers().map_err(|source| LoadError::Header {
        path: path.to_path_buf(),
        source,
    })?;

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for result in reader.deserialize::<T>() {
        match result {
            Ok(record) => records.push(record),
            Err(e) => {
                skipped += 1;
                tracing::debug!(path = %path.display(), error = %e, "Skipping malformed row");
            }
        }
    }

    if skipped > 0 {
        tracing::warn!(
            path = %path.display(),
            skipped,
            kept = records.len(),
            "Some rows could not be parsed"
        );
    }

    Ok(records)
}

/// Converts raw rows, dropping those whose timestamp can't be represented
pub fn convert_timestamped<R, T>(raw: Vec<R>, relation: &'static str) -> Vec<T>
where
    T: TryFrom<R, Error = i64>,
{
    let total = raw.len();
    let converted: Vec<T> = raw
        .into_iter()
        .filter_map(|row| match T::try_from(row) {
            Ok(value) => Some(value),
            Err(seconds) => {
                tracing::debug!(relation, seconds, "Dropping row with invalid timestamp");
                None
            }
        })
        .collect();

    if converted.len() < total {
        tracing::warn!(
            relation,
            dropped = total - converted.len(),
            "Rows dropped for invalid timestamps"
        );
    }

    converted
}
