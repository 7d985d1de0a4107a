pub mod cluster;
pub mod compositor;
pub mod controller;
pub mod influence_ranking;
pub mod providers;
pub mod visualization;

pub use controller::{RecommendationController, SMART_UNLOCK_THRESHOLD};
pub use visualization::{LatestFrameSink, VisualizationSink};
