/// HTTP provider for the movie backend
///
/// Implements both the rating feed and the preference oracle on top of the
/// backend's JSON endpoints:
/// - Feed: `/movies/{random|smart}`, `/movies/rate`, `/movies/favorite/toggle`, `/movies/history`
/// - Oracle: `/movies/embedding`, `/movies/{id}/influence`
///
/// The session cookie, when configured, is forwarded on every call so the backend
/// resolves the same user the browser is signed in as.
use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{EmbeddingSpace, HistoryEntry, InfluenceRecord, Movie, MovieId, RatingMode},
    services::providers::{PreferenceOracle, RatingFeed},
};
use reqwest::{header, Client as HttpClient, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct RateRequest {
    movie_id: MovieId,
    rating: bool,
}

#[derive(Debug, Serialize)]
struct FavoriteRequest {
    movie_id: MovieId,
}

#[derive(Debug, Deserialize)]
struct FavoriteResponse {
    is_favorite: bool,
}

/// Error body the backend returns alongside non-2xx statuses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

#[derive(Clone)]
pub struct HttpBackend {
    http_client: HttpClient,
    api_url: String,
    session_cookie: Option<String>,
}

impl HttpBackend {
    pub fn new(
        api_url: impl Into<String>,
        session_cookie: Option<String>,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            session_cookie,
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(
            config.backend_api_url.clone(),
            config.session_cookie.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    fn with_session(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.session_cookie {
            Some(cookie) => request.header(header::COOKIE, cookie),
            None => request,
        }
    }

    async fn get(&self, path: &str) -> AppResult<Response> {
        let request = self.with_session(self.http_client.get(self.url(path)));
        ensure_success(request.send().await?).await
    }

    async fn post<B: Serialize + Sync>(&self, path: &str, body: &B) -> AppResult<Response> {
        let request = self.with_session(self.http_client.post(self.url(path)).json(body));
        ensure_success(request.send().await?).await
    }
}

/// Maps a non-2xx response onto the error taxonomy
async fn ensure_success(response: Response) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let err = error_from_status(status, &body);
    tracing::debug!(status = %status, error = %err, "Backend returned error status");
    Err(err)
}

fn error_from_status(status: StatusCode, body: &str) -> AppError {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail)
        .map(|d| match d {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        });

    match status {
        StatusCode::UNAUTHORIZED => AppError::Unauthorized,
        StatusCode::NOT_FOUND => {
            AppError::NotFound(detail.unwrap_or_else(|| "Not found".to_string()))
        }
        _ => AppError::RequestFailed {
            detail: Some(detail.unwrap_or_else(|| format!("Request failed with {}", status.as_u16()))),
        },
    }
}

#[async_trait::async_trait]
impl RatingFeed for HttpBackend {
    async fn fetch_next_movie(&self, mode: RatingMode) -> AppResult<Movie> {
        let response = self.get(&format!("/movies/{}", mode.feed_path())).await?;
        let movie: Movie = response.json().await?;

        tracing::debug!(
            movie_id = movie.id,
            mode = %mode,
            provider = self.name(),
            "Fetched next movie"
        );

        Ok(movie)
    }

    async fn submit_rating(&self, movie_id: MovieId, is_up: bool) -> AppResult<()> {
        self.post(
            "/movies/rate",
            &RateRequest {
                movie_id,
                rating: is_up,
            },
        )
        .await?;
        Ok(())
    }

    async fn toggle_favorite(&self, movie_id: MovieId) -> AppResult<bool> {
        let response = self
            .post("/movies/favorite/toggle", &FavoriteRequest { movie_id })
            .await?;
        let body: FavoriteResponse = response.json().await?;
        Ok(body.is_favorite)
    }

    async fn fetch_rating_history(&self) -> AppResult<Vec<HistoryEntry>> {
        let response = self.get("/movies/history").await?;
        Ok(response.json().await?)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

#[async_trait::async_trait]
impl PreferenceOracle for HttpBackend {
    async fn fetch_embedding_space(&self) -> AppResult<EmbeddingSpace> {
        let response = self.get("/movies/embedding").await?;
        let space: EmbeddingSpace = response.json().await?;

        tracing::debug!(
            points = space.points.len(),
            has_user_point = space.user_point.is_some(),
            "Fetched embedding space"
        );

        Ok(space)
    }

    async fn fetch_influence(&self, movie_id: MovieId) -> AppResult<Vec<InfluenceRecord>> {
        let response = self.get(&format!("/movies/{}/influence", movie_id)).await?;
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_strips_trailing_slash() {
        let backend =
            HttpBackend::new("http://test.local/api/", None, Duration::from_secs(1)).unwrap();
        assert_eq!(backend.url("/movies/random"), "http://test.local/api/movies/random");
    }

    #[test]
    fn test_not_found_maps_to_not_found() {
        let err = error_from_status(StatusCode::NOT_FOUND, r#"{"detail": "No more unseen movies"}"#);
        match err {
            AppError::NotFound(msg) => assert_eq!(msg, "No more unseen movies"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_unauthorized() {
        let err = error_from_status(StatusCode::UNAUTHORIZED, "");
        assert!(matches!(err, AppError::Unauthorized));
    }

    #[test]
    fn test_server_error_carries_detail() {
        let err = error_from_status(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"detail": "Embedding model not loaded"}"#,
        );
        assert_eq!(err.to_string(), "Embedding model not loaded");
    }

    #[test]
    fn test_server_error_without_json_body() {
        let err = error_from_status(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>");
        assert_eq!(err.to_string(), "Request failed with 502");
    }

    #[test]
    fn test_validation_detail_is_stringified() {
        let err = error_from_status(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"detail": [{"loc": ["body", "movie_id"], "msg": "field required"}]}"#,
        );
        assert!(err.to_string().contains("field required"));
    }
}
