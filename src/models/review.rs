//! Book review model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Full book review model from database.
///
/// `created_at` is set by the database at insert and never updated.
/// `book_label` ("author - title") and `reader_username` are computed
/// fields populated when queried with JOINs, None otherwise.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookReview {
    pub id: i32,
    pub book_id: i32,
    pub reader_id: i32,
    pub created_at: NaiveDate,
    pub content: String,
    #[sqlx(default)]
    #[serde(default)]
    pub book_label: Option<String>,
    #[sqlx(default)]
    #[serde(default)]
    pub reader_username: Option<String>,
}

impl std::fmt::Display for BookReview {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} on {} at {}",
            self.reader_username.as_deref().unwrap_or_default(),
            self.book_label.as_deref().unwrap_or_default(),
            self.created_at
        )
    }
}

/// Create review request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBookReview {
    pub book_id: i32,
    pub reader_id: i32,
    pub content: String,
}
