use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::{json, Value};

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{
        MovieRecord, PicksFeedRequest, PicksFeedResponse, RatedFeedRequest, RatedFeedResponse,
        SearchHit, SearchQuery,
    },
};

use super::AppState;

/// Service banner
pub async fn home(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "msg": "Icadus Ready",
        "movies": state.recommender().catalog().len(),
    }))
}

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Title search, catalog order
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Json<Vec<SearchHit>> {
    let hits = state.recommender().search(&params.query);
    tracing::debug!(query = %params.query, hits = hits.len(), "Title search");
    Json(hits)
}

/// Single movie by TMDb id
pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MovieRecord>> {
    let movie = state.recommender().movie(&id)?;
    Ok(Json(movie.clone()))
}

/// Configured mood names
pub async fn list_moods(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.recommender().moods().names())
}

/// Next feed batch from star ratings
pub async fn next_batch(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RatedFeedRequest>,
) -> AppResult<Json<RatedFeedResponse>> {
    tracing::info!(
        request_id = %request_id,
        rated = request.rated_movies.len(),
        viewed = request.viewed_ids.len(),
        "Processing ratings feed request"
    );

    let response = {
        let mut rng = state.rng()?;
        state.recommender().next_batch(&request, &mut *rng)?
    };

    Ok(Json(response))
}

/// Recommendations from seed picks and likes
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<PicksFeedRequest>,
) -> AppResult<Json<PicksFeedResponse>> {
    tracing::info!(
        request_id = %request_id,
        seeds = request.seed_movies.len(),
        likes = request.rated_movies.len(),
        dislikes = request.disliked_movies.len(),
        viewed = request.viewed_ids.len(),
        mood = request.mood.as_deref().unwrap_or("none"),
        "Processing picks feed request"
    );

    let response = {
        let mut rng = state.rng()?;
        state.recommender().recommend(&request, &mut *rng)?
    };

    Ok(Json(response))
}
