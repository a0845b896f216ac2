use axum::{
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::services::recommendations::RecommendError;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<RecommendError> for AppError {
    fn from(err: RecommendError) -> Self {
        match err {
            RecommendError::UnknownUser(_) => AppError::NotFound(err.to_string()),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
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
    use crate::models::RecommendationQuery;
    use axum::extract::Query;

    #[test]
    fn test_unknown_user_maps_to_not_found() {
        let err: AppError = RecommendError::UnknownUser(42).into();
        assert!(matches!(err, AppError::NotFound(ref msg) if msg == "Unknown user: 42"));
    }

    #[test]
    fn test_status_codes() {
        let not_found = AppError::NotFound("x".to_string()).into_response();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let invalid = AppError::InvalidInput("x".to_string()).into_response();
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_query_rejection_maps_to_invalid_input() {
        let uri: axum::http::Uri = "/?top_k=abc".parse().unwrap();
        let rejection = Query::<RecommendationQuery>::try_from_uri(&uri).unwrap_err();

        let err: AppError = rejection.into();
        assert!(matches!(err, AppError::InvalidInput(ref msg) if !msg.is_empty()));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
