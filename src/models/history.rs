use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{MovieId, RatingValue};

/// One row of the user's rating history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    #[serde(default)]
    pub movie_id: Option<MovieId>,
    pub movie_title: String,
    #[serde(default)]
    pub rating: RatingValue,
    #[serde(default)]
    pub is_favorite: bool,
    pub created_at: DateTime<Utc>,
}

/// Up/down/unrated tally over the rating history
///
/// Unrated rows are kept apart instead of being folded into "down".
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RatingSummary {
    pub total: usize,
    pub up: usize,
    pub down: usize,
    pub unrated: usize,
}

impl RatingSummary {
    pub fn from_history(entries: &[HistoryEntry]) -> Self {
        entries
            .iter()
            .fold(Self::default(), |mut summary, entry| {
                summary.total += 1;
                match entry.rating {
                    RatingValue::Liked => summary.up += 1,
                    RatingValue::Disliked => summary.down += 1,
                    RatingValue::Unrated => summary.unrated += 1,
                }
                summary
            })
    }

    /// Rows that carry an actual up or down rating
    pub fn rated(&self) -> usize {
        self.up + self.down
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(rating: Option<bool>) -> HistoryEntry {
        HistoryEntry {
            movie_id: Some(1),
            movie_title: "Memento".to_string(),
            rating: rating.into(),
            is_favorite: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_summary_keeps_unrated_separate() {
        let history = vec![entry(Some(true)), entry(Some(false)), entry(None), entry(Some(true))];
        let summary = RatingSummary::from_history(&history);
        assert_eq!(
            summary,
            RatingSummary {
                total: 4,
                up: 2,
                down: 1,
                unrated: 1,
            }
        );
        assert_eq!(summary.rated(), 3);
    }

    #[test]
    fn test_summary_of_empty_history() {
        assert_eq!(RatingSummary::from_history(&[]), RatingSummary::default());
    }

    #[test]
    fn test_history_entry_deserialization() {
        let json = r#"{
            "movie_id": 12,
            "movie_title": "Blade Runner",
            "rating": false,
            "is_favorite": true,
            "created_at": "2025-11-02T18:30:00Z"
        }"#;

        let entry: HistoryEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.movie_id, Some(12));
        assert_eq!(entry.rating, RatingValue::Disliked);
        assert!(entry.is_favorite);
    }
}
