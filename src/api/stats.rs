//! Catalogue statistics endpoints (public landing page counts)

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppResult;

/// Aggregate catalogue counts
#[derive(Serialize, ToSchema)]
pub struct CountsResponse {
    /// Total number of catalogued titles
    pub books: i64,
    /// Total number of copies
    pub book_instances: i64,
    /// Copies currently available for loan
    pub book_instances_available: i64,
    /// Total number of authors
    pub authors: i64,
    /// Total number of genres
    pub genres: i64,
}

/// Get aggregate catalogue counts
#[utoipa::path(
    get,
    path = "/stats",
    tag = "stats",
    responses(
        (status = 200, description = "Catalogue counts", body = CountsResponse)
    )
)]
pub async fn get_counts(State(state): State<crate::AppState>) -> AppResult<Json<CountsResponse>> {
    let counts = state.services.stats.get_counts().await?;
    Ok(Json(counts))
}
