//! Research-view refresh: pulls the embedding space and influence scores for one
//! movie, runs the compositor, cluster estimator and influence presenter, and
//! hands the finished frame to a sink.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    error::AppResult,
    models::{EmbeddingSpace, InfluenceRecord, MovieId, SkipReason, VisualizationFrame},
    services::{
        cluster::estimate_cluster, compositor::compose, influence_ranking::present_influence,
        providers::PreferenceOracle,
    },
};

/// Draws frames; every call replaces whatever was drawn before
#[async_trait::async_trait]
pub trait VisualizationSink: Send + Sync {
    async fn render(&self, frame: VisualizationFrame);
}

/// Sink that keeps only the most recent frame, for clients that poll for it
#[derive(Default)]
pub struct LatestFrameSink {
    frame: RwLock<Option<VisualizationFrame>>,
}

impl LatestFrameSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn latest(&self) -> Option<VisualizationFrame> {
        self.frame.read().await.clone()
    }
}

#[async_trait::async_trait]
impl VisualizationSink for LatestFrameSink {
    async fn render(&self, frame: VisualizationFrame) {
        *self.frame.write().await = Some(frame);
    }
}

/// Assembles a frame from already-fetched oracle data
///
/// Returns `None` for an empty embedding space: nothing is drawn rather than
/// an empty chart.
pub fn assemble_frame(
    movie_id: MovieId,
    space: &EmbeddingSpace,
    influence: &[InfluenceRecord],
) -> Option<VisualizationFrame> {
    if space.points.is_empty() {
        tracing::debug!(movie_id, reason = %SkipReason::EmptyEmbeddingSpace, "Skipping render");
        return None;
    }

    let datasets = compose(&space.points, influence, Some(movie_id), space.user_point);
    let cluster = estimate_cluster(influence, &space.points, Some(movie_id));

    Some(VisualizationFrame {
        movie_id,
        categories: datasets.to_categories(),
        cluster,
        influence_panel: present_influence(influence),
        rendered_at: Utc::now(),
    })
}

pub struct VisualizationRefresher {
    oracle: Arc<dyn PreferenceOracle>,
}

impl VisualizationRefresher {
    pub fn new(oracle: Arc<dyn PreferenceOracle>) -> Self {
        Self { oracle }
    }

    /// Fetches both oracle views for `movie_id` and assembles the frame
    pub async fn build_frame(&self, movie_id: MovieId) -> AppResult<Option<VisualizationFrame>> {
        let (space, influence) = tokio::join!(
            self.oracle.fetch_embedding_space(),
            self.oracle.fetch_influence(movie_id)
        );
        let space = space?;
        let influence = influence?;

        tracing::debug!(
            movie_id,
            points = space.points.len(),
            influence_records = influence.len(),
            "Fetched research view data"
        );

        Ok(assemble_frame(movie_id, &space, &influence))
    }
}
