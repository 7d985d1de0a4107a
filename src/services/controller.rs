//! Recommendation state controller.
//!
//! Owns the session state and is the only thing that mutates it. Network calls
//! run without holding the state lock; completions re-acquire it and are applied
//! only if they still belong to the latest request (loads, refreshes) or to the
//! same movie turn (ratings, favorites). Nothing is retried automatically.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::{
        FeedState, Movie, MovieId, RatingMode, RatingSummary, SessionEvent, SessionView,
        SkipReason, StatusMessage,
    },
    services::{
        providers::{PreferenceOracle, RatingFeed},
        visualization::{VisualizationRefresher, VisualizationSink},
    },
};

/// Ratings needed before smart mode can be selected
pub const SMART_UNLOCK_THRESHOLD: u32 = 10;

const EXHAUSTED_MESSAGE: &str = "You have rated all available movies.";

/// Mutable session state, rebuilt from scratch on every start
#[derive(Debug, Default)]
pub struct RecommendationState {
    current_movie: Option<Movie>,
    mode: RatingMode,
    rating_count: u32,
    notified_unlock: bool,
    is_favorite: bool,
    research_visible: bool,
    feed: FeedState,
    status: Option<StatusMessage>,
    pending_events: Vec<SessionEvent>,
    /// Bumped whenever the current movie is replaced or cleared
    turn: u64,
    turn_rated: bool,
    load_seq: u64,
    refresh_seq: u64,
}

impl RecommendationState {
    pub fn new(research_visible: bool) -> Self {
        Self {
            research_visible,
            ..Default::default()
        }
    }

    pub fn smart_unlocked(&self) -> bool {
        self.rating_count >= SMART_UNLOCK_THRESHOLD
    }

    pub fn rating_enabled(&self) -> bool {
        self.feed == FeedState::Ready && self.current_movie.is_some() && !self.turn_rated
    }

    pub fn current_movie_id(&self) -> Option<MovieId> {
        self.current_movie.as_ref().map(|m| m.id)
    }

    /// Sets the count derived from history; an already-unlocked session is not a transition
    fn seed_rating_count(&mut self, count: u32) {
        self.rating_count = count;
        self.notified_unlock = self.smart_unlocked();
    }

    fn replace_movie(&mut self, movie: Movie) {
        self.is_favorite = movie.is_favorite;
        self.current_movie = Some(movie);
        self.turn += 1;
        self.turn_rated = false;
        self.feed = FeedState::Ready;
        self.status = None;
    }

    fn enter_exhausted(&mut self) {
        self.current_movie = None;
        self.is_favorite = false;
        self.turn += 1;
        self.turn_rated = false;
        self.feed = FeedState::Exhausted;
        self.status = Some(StatusMessage::info(EXHAUSTED_MESSAGE));
    }

    fn surface_error(&mut self, err: &AppError) {
        self.status = Some(StatusMessage::danger(err.user_message()));
    }

    /// Counts a successful rating for `turn`
    ///
    /// Returns the mode to load next, or `None` when the completion is stale
    /// (the movie was replaced, or this turn was already counted).
    fn apply_rating(&mut self, turn: u64) -> Option<RatingMode> {
        if turn != self.turn || self.turn_rated {
            return None;
        }
        self.turn_rated = true;
        self.rating_count += 1;

        if self.smart_unlocked() && !self.notified_unlock {
            self.notified_unlock = true;
            self.pending_events.push(SessionEvent::SmartModeUnlocked);
            tracing::info!(rating_count = self.rating_count, "Smart mode unlocked");
        }

        Some(self.mode)
    }

    fn view(&mut self) -> SessionView {
        SessionView {
            current_movie: self.current_movie.clone(),
            mode: self.mode,
            rating_count: self.rating_count,
            smart_unlocked: self.smart_unlocked(),
            is_favorite: self.is_favorite,
            feed: self.feed,
            rating_enabled: self.rating_enabled(),
            research_visible: self.research_visible,
            status: self.status.clone(),
            events: std::mem::take(&mut self.pending_events),
        }
    }
}

pub struct RecommendationController {
    feed: Arc<dyn RatingFeed>,
    refresher: VisualizationRefresher,
    sink: Arc<dyn VisualizationSink>,
    state: RwLock<RecommendationState>,
}

impl RecommendationController {
    pub fn new(
        feed: Arc<dyn RatingFeed>,
        oracle: Arc<dyn PreferenceOracle>,
        sink: Arc<dyn VisualizationSink>,
        research_visible: bool,
    ) -> Self {
        Self {
            feed,
            refresher: VisualizationRefresher::new(oracle),
            sink,
            state: RwLock::new(RecommendationState::new(research_visible)),
        }
    }

    /// Seeds the rating count from history and loads the first movie
    ///
    /// Only rows with an up or down rating count toward the smart-mode unlock.
    pub async fn initialize(&self) -> AppResult<()> {
        let count = match self.feed.fetch_rating_history().await {
            Ok(history) => RatingSummary::from_history(&history).rated() as u32,
            Err(e) => {
                tracing::warn!(error = %e, "Could not load rating history, starting count at 0");
                0
            }
        };

        let mode = {
            let mut state = self.state.write().await;
            state.seed_rating_count(count);
            state.mode
        };

        tracing::info!(rating_count = count, mode = %mode, "Recommendation session initialized");

        self.load_next(mode).await
    }

    /// Pulls the next candidate for `mode` and makes it the current movie
    pub async fn load_next(&self, mode: RatingMode) -> AppResult<()> {
        let seq = {
            let mut state = self.state.write().await;
            state.load_seq += 1;
            state.load_seq
        };

        let result = self.feed.fetch_next_movie(mode).await;

        {
            let mut state = self.state.write().await;
            if seq != state.load_seq {
                tracing::debug!(seq, latest = state.load_seq, "Discarding stale movie load");
                return Ok(());
            }

            match result {
                Ok(movie) => {
                    tracing::info!(movie_id = movie.id, title = %movie.title, mode = %mode, "Loaded next movie");
                    state.replace_movie(movie);
                    if !state.research_visible {
                        return Ok(());
                    }
                }
                Err(AppError::NotFound(detail)) => {
                    tracing::info!(mode = %mode, detail = %detail, "Rating feed exhausted");
                    state.enter_exhausted();
                    return Ok(());
                }
                Err(e) => {
                    tracing::error!(error = %e, mode = %mode, "Failed to load next movie");
                    state.surface_error(&e);
                    return Err(e);
                }
            }
        }

        self.refresh_visualization().await;
        Ok(())
    }

    /// Rates the current movie up or down, then moves on to the next one
    pub async fn rate(&self, is_up: bool) -> AppResult<()> {
        let (movie_id, turn) = {
            let state = self.state.read().await;
            match (&state.current_movie, state.rating_enabled()) {
                (Some(movie), true) => (movie.id, state.turn),
                _ => {
                    tracing::debug!("Ignoring rating: no ratable movie");
                    return Ok(());
                }
            }
        };

        if let Err(e) = self.feed.submit_rating(movie_id, is_up).await {
            tracing::error!(error = %e, movie_id, "Failed to submit rating");
            self.state.write().await.surface_error(&e);
            return Err(e);
        }

        let next_mode = self.state.write().await.apply_rating(turn);
        match next_mode {
            Some(mode) => {
                tracing::debug!(movie_id, is_up, "Rating saved");
                self.load_next(mode).await
            }
            None => {
                tracing::debug!(movie_id, "Discarding stale rating completion");
                Ok(())
            }
        }
    }

    /// Toggles the favorite flag of the current movie, trusting the server's answer
    pub async fn toggle_favorite(&self) -> AppResult<()> {
        let (movie_id, turn) = {
            let state = self.state.read().await;
            match state.current_movie_id() {
                Some(id) => (id, state.turn),
                None => return Ok(()),
            }
        };

        match self.feed.toggle_favorite(movie_id).await {
            Ok(is_favorite) => {
                let mut state = self.state.write().await;
                if state.turn != turn {
                    tracing::debug!(movie_id, "Discarding favorite toggle for replaced movie");
                    return Ok(());
                }
                state.is_favorite = is_favorite;
                if let Some(movie) = state.current_movie.as_mut() {
                    movie.is_favorite = is_favorite;
                }
                tracing::debug!(movie_id, is_favorite, "Favorite updated");
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, movie_id, "Failed to toggle favorite");
                self.state.write().await.surface_error(&e);
                Err(e)
            }
        }
    }

    /// Switches recommendation mode; returns `false` if smart mode is still locked
    pub async fn set_mode(&self, mode: RatingMode) -> AppResult<bool> {
        {
            let mut state = self.state.write().await;
            if mode == RatingMode::Smart && !state.smart_unlocked() {
                tracing::info!(
                    rating_count = state.rating_count,
                    threshold = SMART_UNLOCK_THRESHOLD,
                    "Smart mode requested while locked"
                );
                return Ok(false);
            }
            state.mode = mode;
        }

        self.load_next(mode).await?;
        Ok(true)
    }

    /// Shows or hides the research panel; showing it refreshes the chart
    pub async fn set_research_visible(&self, visible: bool) {
        let was_visible = {
            let mut state = self.state.write().await;
            std::mem::replace(&mut state.research_visible, visible)
        };

        if visible && !was_visible {
            self.refresh_visualization().await;
        }
    }

    /// Re-renders the research view for the current movie
    ///
    /// Failures are logged and leave the previous frame in place.
    pub async fn refresh_visualization(&self) {
        let (movie_id, seq) = {
            let mut state = self.state.write().await;
            let Some(movie_id) = state.current_movie_id() else {
                tracing::debug!(reason = %SkipReason::NoCurrentMovie, "Skipping visualization refresh");
                return;
            };
            state.refresh_seq += 1;
            (movie_id, state.refresh_seq)
        };

        match self.refresher.build_frame(movie_id).await {
            Ok(Some(frame)) => {
                let state = self.state.read().await;
                if state.refresh_seq != seq || state.current_movie_id() != Some(movie_id) {
                    tracing::debug!(movie_id, "Discarding stale visualization frame");
                    return;
                }
                let categories = frame.categories.len();
                self.sink.render(frame).await;
                tracing::debug!(movie_id, categories, "Visualization rendered");
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(error = %e, movie_id, "Visualization refresh failed, keeping previous frame");
            }
        }
    }

    pub async fn mode(&self) -> RatingMode {
        self.state.read().await.mode
    }

    /// Current session view; drains pending one-time events
    pub async fn snapshot(&self) -> SessionView {
        self.state.write().await.view()
    }
}
