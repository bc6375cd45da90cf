//! Book instance (loanable copy) management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::book_instance::{
        BookInstance, BookInstanceQuery, CreateBookInstance, UpdateBookInstance,
    },
};

use super::PaginatedResponse;

/// List copies with filters (status, due date) and free-text search
/// across unique_id, book title, author last name and reader last name
#[utoipa::path(
    get,
    path = "/book-instances",
    tag = "book-instances",
    params(BookInstanceQuery),
    responses(
        (status = 200, description = "Paginated list of copies, ordered by due date")
    )
)]
pub async fn list_book_instances(
    State(state): State<crate::AppState>,
    Query(query): Query<BookInstanceQuery>,
) -> AppResult<Json<PaginatedResponse<BookInstance>>> {
    let (instances, total) = state.services.catalog.search_book_instances(&query).await?;

    Ok(Json(PaginatedResponse {
        items: instances,
        total,
        page: query.page.unwrap_or(1),
        per_page: query.per_page.unwrap_or(20),
    }))
}

/// Get copy details by ID
#[utoipa::path(
    get,
    path = "/book-instances/{id}",
    tag = "book-instances",
    params(("id" = i32, Path, description = "Book instance ID")),
    responses(
        (status = 200, description = "Copy details", body = BookInstance),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn get_book_instance(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BookInstance>> {
    let instance = state.services.catalog.get_book_instance(id).await?;
    Ok(Json(instance))
}

/// Create a new copy; the unique_id is server-generated
#[utoipa::path(
    post,
    path = "/book-instances",
    tag = "book-instances",
    request_body = CreateBookInstance,
    responses(
        (status = 201, description = "Copy created", body = BookInstance),
        (status = 404, description = "Referenced book not found")
    )
)]
pub async fn create_book_instance(
    State(state): State<crate::AppState>,
    Json(instance): Json<CreateBookInstance>,
) -> AppResult<(StatusCode, Json<BookInstance>)> {
    let created = state.services.catalog.create_book_instance(instance).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a copy's status, due date or reader. The unique_id cannot be
/// changed.
#[utoipa::path(
    put,
    path = "/book-instances/{id}",
    tag = "book-instances",
    params(("id" = i32, Path, description = "Book instance ID")),
    request_body = UpdateBookInstance,
    responses(
        (status = 200, description = "Copy updated", body = BookInstance),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn update_book_instance(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(instance): Json<UpdateBookInstance>,
) -> AppResult<Json<BookInstance>> {
    let updated = state
        .services
        .catalog
        .update_book_instance(id, instance)
        .await?;
    Ok(Json(updated))
}

/// Delete a copy
#[utoipa::path(
    delete,
    path = "/book-instances/{id}",
    tag = "book-instances",
    params(("id" = i32, Path, description = "Book instance ID")),
    responses(
        (status = 204, description = "Copy deleted"),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn delete_book_instance(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.catalog.delete_book_instance(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
