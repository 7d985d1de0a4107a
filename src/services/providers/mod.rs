/// Movie backend abstraction
///
/// The engine talks to two collaborators: the rating feed (next movie, ratings,
/// favorites, history) and the preference oracle (embedding space and influence
/// scores). Both are served by the same backend today, but they are separate
/// traits so either side can be swapped or mocked on its own.
use crate::{
    error::AppResult,
    models::{EmbeddingSpace, HistoryEntry, InfluenceRecord, Movie, MovieId, RatingMode},
};

pub mod http;

pub use http::HttpBackend;

/// Source of the one-movie-at-a-time rating loop
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RatingFeed: Send + Sync {
    /// Next unrated movie for `mode`
    ///
    /// Returns `AppError::NotFound` once no candidates remain.
    async fn fetch_next_movie(&self, mode: RatingMode) -> AppResult<Movie>;

    /// Records an up (`true`) or down (`false`) rating
    async fn submit_rating(&self, movie_id: MovieId, is_up: bool) -> AppResult<()>;

    /// Flips the favorite flag server-side and returns the resulting value
    async fn toggle_favorite(&self, movie_id: MovieId) -> AppResult<bool>;

    /// Full rating history of the signed-in user, newest first
    async fn fetch_rating_history(&self) -> AppResult<Vec<HistoryEntry>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Source of the preference-space data behind the research view
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PreferenceOracle: Send + Sync {
    /// Every known movie projected to 2-D, plus the user's own position
    async fn fetch_embedding_space(&self) -> AppResult<EmbeddingSpace>;

    /// Prior ratings that most influenced `movie_id`'s recommendation score
    async fn fetch_influence(&self, movie_id: MovieId) -> AppResult<Vec<InfluenceRecord>>;
}
