//! API handlers for the Libris REST endpoints

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;
pub mod health;
pub mod openapi;
pub mod registration;
pub mod reviews;
pub mod stats;
pub mod users;

use serde::Serialize;

/// Paginated list envelope shared by the listing endpoints
#[derive(Serialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}
