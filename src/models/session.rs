use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Movie, RatingMode};

/// Where the rating feed stands for this session
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FeedState {
    /// Nothing loaded yet
    #[default]
    Idle,
    Ready,
    /// The feed ran out of candidates; terminal until the mode changes
    Exhausted,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StatusLevel {
    Info,
    Danger,
}

/// Transient message shown above the rating controls
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
    pub raised_at: DateTime<Utc>,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Info,
            text: text.into(),
            raised_at: Utc::now(),
        }
    }

    pub fn danger(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Danger,
            text: text.into(),
            raised_at: Utc::now(),
        }
    }
}

/// One-shot notifications delivered with the next session view
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SessionEvent {
    SmartModeUnlocked,
}

/// Read-only snapshot of the recommendation session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionView {
    pub current_movie: Option<Movie>,
    pub mode: RatingMode,
    pub rating_count: u32,
    pub smart_unlocked: bool,
    pub is_favorite: bool,
    pub feed: FeedState,
    pub rating_enabled: bool,
    pub research_visible: bool,
    pub status: Option<StatusMessage>,
    pub events: Vec<SessionEvent>,
}
