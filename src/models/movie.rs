use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Backend identifier for a movie
pub type MovieId = i64;

/// A movie as served by the rating feed for the current turn
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default, alias = "startYear")]
    pub release_year: Option<i32>,
    #[serde(default)]
    pub imdb_rating: Option<f64>,
    #[serde(default)]
    pub imdb_votes: Option<i64>,
    #[serde(default)]
    pub is_favorite: bool,
}

/// Recommendation strategy requested from the feed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RatingMode {
    /// Unweighted pick among unrated movies
    #[default]
    Random,
    /// Ranked by the learned preference model; gated by the unlock threshold
    Smart,
}

impl RatingMode {
    /// Path segment of the feed endpoint serving this mode
    pub fn feed_path(self) -> &'static str {
        match self {
            RatingMode::Random => "random",
            RatingMode::Smart => "smart",
        }
    }
}

impl Display for RatingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.feed_path())
    }
}

/// A user's rating of one movie: up, down, or not rated at all
///
/// Wire format is the backend's nullable boolean (`true`, `false`, `null`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum RatingValue {
    Liked,
    Disliked,
    #[default]
    Unrated,
}

impl From<Option<bool>> for RatingValue {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => RatingValue::Liked,
            Some(false) => RatingValue::Disliked,
            None => RatingValue::Unrated,
        }
    }
}

impl From<RatingValue> for Option<bool> {
    fn from(value: RatingValue) -> Self {
        match value {
            RatingValue::Liked => Some(true),
            RatingValue::Disliked => Some(false),
            RatingValue::Unrated => None,
        }
    }
}
