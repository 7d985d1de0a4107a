//! Render-ready shapes handed to the visualization sink.
//!
//! Nothing in here is reclassified by the sink: categories arrive disjoint
//! and the sink only draws them.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Coordinate, MovieId, RatingValue};

/// Named point category drawn by the chart
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    CurrentMovie,
    Influential,
    Liked,
    Disliked,
    Unseen,
    UserPreference,
}

impl CategoryKind {
    /// Legend label
    pub fn label(self) -> &'static str {
        match self {
            CategoryKind::CurrentMovie => "Current movie",
            CategoryKind::Influential => "Influential ratings",
            CategoryKind::Liked => "Liked",
            CategoryKind::Disliked => "Disliked",
            CategoryKind::Unseen => "Unseen",
            CategoryKind::UserPreference => "Your preference",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ColorHint {
    Highlight,
    Positive,
    Negative,
    Neutral,
    User,
}

impl From<RatingValue> for ColorHint {
    fn from(rating: RatingValue) -> Self {
        match rating {
            RatingValue::Liked => ColorHint::Positive,
            RatingValue::Disliked => ColorHint::Negative,
            RatingValue::Unrated => ColorHint::Neutral,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlotPoint {
    pub movie_id: Option<MovieId>,
    pub x: f64,
    pub y: f64,
    pub label: Option<String>,
    pub color: Option<ColorHint>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PointCategory {
    pub kind: CategoryKind,
    pub name: String,
    pub points: Vec<PlotPoint>,
}

/// Centroid and radius of the points that influenced the current recommendation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PreferenceCluster {
    pub center: Coordinate,
    pub radius: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InfluenceDirection {
    Toward,
    Away,
}

impl InfluenceDirection {
    pub fn marker(self) -> &'static str {
        match self {
            InfluenceDirection::Toward => "▲",
            InfluenceDirection::Away => "▼",
        }
    }
}

/// One line of the influence side panel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InfluenceEntry {
    pub movie_id: MovieId,
    pub title: String,
    pub direction: InfluenceDirection,
    pub marker: String,
    /// Absolute weight, three decimals
    pub magnitude: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InfluencePanel {
    pub entries: Vec<InfluenceEntry>,
}

/// Everything drawn for one refresh of the research view
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VisualizationFrame {
    /// Movie the frame explains
    pub movie_id: MovieId,
    pub categories: Vec<PointCategory>,
    pub cluster: Option<PreferenceCluster>,
    /// `None` means the panel is hidden
    pub influence_panel: Option<InfluencePanel>,
    pub rendered_at: DateTime<Utc>,
}

/// Why a research-view computation produced nothing; logged, never returned as an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoCurrentMovie,
    EmptyEmbeddingSpace,
    NoResolvableInfluence,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoCurrentMovie => write!(f, "no_current_movie"),
            SkipReason::EmptyEmbeddingSpace => write!(f, "empty_embedding_space"),
            SkipReason::NoResolvableInfluence => write!(f, "no_resolvable_influence"),
        }
    }
}
