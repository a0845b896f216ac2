use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Extension, Json,
};
use serde_json::{json, Value};

use crate::error::AppResult;
use crate::middleware::request_id::RequestId;
use crate::models::{RecommendationQuery, Recommendations, UserId};
use crate::services::Summary;

use super::AppState;

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Seen movies and top-K recommendations for one user
pub async fn get_recommendations(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    path: Result<Path<UserId>, PathRejection>,
    query: Result<Query<RecommendationQuery>, QueryRejection>,
) -> AppResult<Json<Recommendations>> {
    let Path(user_id) = path?;
    let Query(query) = query?;
    let top_k = query.top_k.unwrap_or(state.default_top_k);

    tracing::info!(
        request_id = %request_id,
        user_id,
        top_k,
        "Processing recommendation request"
    );

    let recommendations = state.pipeline.recommend(&state.store, user_id, top_k)?;

    tracing::info!(
        request_id = %request_id,
        seen = recommendations.seen.len(),
        recommended = recommendations.recommended.len(),
        "Recommendations completed"
    );

    Ok(Json(recommendations))
}

/// Descriptive statistics of the dataset and matrices
pub async fn get_stats(State(state): State<AppState>) -> Json<Summary> {
    Json(Summary::from_store(&state.store, &state.pipeline))
}
