use std::sync::Arc;

use crate::services::{
    providers::{PreferenceOracle, RatingFeed},
    LatestFrameSink, RecommendationController,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<RecommendationController>,
    /// Last frame drawn by the research view
    pub frames: Arc<LatestFrameSink>,
    /// Feed used directly for history reads outside the controller
    pub feed: Arc<dyn RatingFeed>,
}

impl AppState {
    /// Wires the controller to its collaborators; the session is not loaded yet
    pub fn new(
        feed: Arc<dyn RatingFeed>,
        oracle: Arc<dyn PreferenceOracle>,
        research_visible: bool,
    ) -> Self {
        let frames = Arc::new(LatestFrameSink::new());
        let controller = Arc::new(RecommendationController::new(
            feed.clone(),
            oracle,
            frames.clone(),
            research_visible,
        ));

        Self {
            controller,
            frames,
            feed,
        }
    }
}
