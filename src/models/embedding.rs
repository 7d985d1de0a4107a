use serde::{Deserialize, Serialize};

use super::{MovieId, RatingValue};

/// A position in the 2-D preference space
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another coordinate
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// One movie projected into the preference space, tagged with the user's rating
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbeddingPoint {
    pub movie_id: MovieId,
    pub title: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub rating: RatingValue,
}

impl EmbeddingPoint {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.x, self.y)
    }
}

/// Aggregate position of everything the user has rated
pub type UserPreferencePoint = Coordinate;

/// Full embedding snapshot returned by the oracle
///
/// Always replaced wholesale; there is no incremental patching.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EmbeddingSpace {
    #[serde(default)]
    pub points: Vec<EmbeddingPoint>,
    /// Present only once the user has rated at least one movie
    #[serde(default)]
    pub user_point: Option<UserPreferencePoint>,
}
