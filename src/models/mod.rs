pub mod embedding;
pub mod history;
pub mod influence;
pub mod movie;
pub mod session;
pub mod visualization;

pub use embedding::{Coordinate, EmbeddingPoint, EmbeddingSpace, UserPreferencePoint};
pub use history::{HistoryEntry, RatingSummary};
pub use influence::InfluenceRecord;
pub use movie::{Movie, MovieId, RatingMode, RatingValue};
pub use session::{FeedState, SessionEvent, SessionView, StatusLevel, StatusMessage};
pub use visualization::{
    CategoryKind, ColorHint, InfluenceDirection, InfluenceEntry, InfluencePanel, PlotPoint,
    PointCategory, PreferenceCluster, SkipReason, VisualizationFrame,
};
