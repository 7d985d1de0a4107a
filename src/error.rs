use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// The backend has nothing to return (e.g. every movie has been rated)
    #[error("Not found: {0}")]
    NotFound(String),

    /// The backend rejected the session; the auth layer takes over from here
    #[error("Unauthorized")]
    Unauthorized,

    #[error("{}", .detail.as_deref().unwrap_or("Request failed"))]
    RequestFailed { detail: Option<String> },

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl AppError {
    /// Builds a `RequestFailed` with a human-readable detail message
    pub fn request_failed(detail: impl Into<String>) -> Self {
        AppError::RequestFailed {
            detail: Some(detail.into()),
        }
    }

    /// Message shown to the user in the transient status line
    pub fn user_message(&self) -> String {
        match self {
            AppError::HttpClient(e) if e.is_timeout() => "Request timed out".to_string(),
            AppError::HttpClient(_) => "Could not reach the movie service".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::RequestFailed { .. } | AppError::HttpClient(_) => {
                (StatusCode::BAD_GATEWAY, self.user_message())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_failed_uses_detail() {
        let err = AppError::request_failed("Movie not rated yet");
        assert_eq!(err.to_string(), "Movie not rated yet");
    }

    #[test]
    fn test_request_failed_without_detail() {
        let err = AppError::RequestFailed { detail: None };
        assert_eq!(err.to_string(), "Request failed");
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::NotFound("x".into()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Unauthorized.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::request_failed("boom").into_response().status(),
            StatusCode::BAD_GATEWAY
        );
    }
}
