//! Book review endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::review::{BookReview, CreateBookReview},
};

/// List all reviews, newest first
#[utoipa::path(
    get,
    path = "/reviews",
    tag = "reviews",
    responses(
        (status = 200, description = "List of reviews", body = Vec<BookReview>)
    )
)]
pub async fn list_reviews(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<BookReview>>> {
    let reviews = state.services.catalog.list_reviews().await?;
    Ok(Json(reviews))
}

/// List reviews for a book, newest first
#[utoipa::path(
    get,
    path = "/books/{id}/reviews",
    tag = "reviews",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Reviews of the book", body = Vec<BookReview>),
        (status = 404, description = "Book not found")
    )
)]
pub async fn list_book_reviews(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<BookReview>>> {
    let reviews = state.services.catalog.list_reviews_for_book(id).await?;
    Ok(Json(reviews))
}

/// Create a new review
#[utoipa::path(
    post,
    path = "/reviews",
    tag = "reviews",
    request_body = CreateBookReview,
    responses(
        (status = 201, description = "Review created", body = BookReview),
        (status = 404, description = "Referenced book or reader not found")
    )
)]
pub async fn create_review(
    State(state): State<crate::AppState>,
    Json(review): Json<CreateBookReview>,
) -> AppResult<(StatusCode, Json<BookReview>)> {
    let created = state.services.catalog.create_review(review).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Delete a review
#[utoipa::path(
    delete,
    path = "/reviews/{id}",
    tag = "reviews",
    params(("id" = i32, Path, description = "Review ID")),
    responses(
        (status = 204, description = "Review deleted"),
        (status = 404, description = "Review not found")
    )
)]
pub async fn delete_review(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.catalog.delete_review(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
