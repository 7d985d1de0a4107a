use serde::{Deserialize, Serialize};

use super::MovieId;

/// How much one prior rating moved the current recommendation
///
/// Positive weights pulled the recommendation toward the current movie,
/// negative ones pushed it away. Records are scoped to a single current movie.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InfluenceRecord {
    pub movie_id: MovieId,
    pub title: String,
    pub influence: f64,
}

impl InfluenceRecord {
    pub fn magnitude(&self) -> f64 {
        self.influence.abs()
    }

    /// Zero counts as pulling toward
    pub fn is_positive(&self) -> bool {
        self.influence >= 0.0
    }
}
