//! Book reviews repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::review::{BookReview, CreateBookReview},
};

const SELECT_REVIEW: &str = r#"
    SELECT r.id, r.book_id, r.reader_id, r.created_at, r.content,
           COALESCE(a.first_name || ' ' || a.last_name, '') || ' - ' || b.title AS book_label,
           u.username AS reader_username
    FROM book_reviews r
    JOIN books b ON r.book_id = b.id
    LEFT JOIN authors a ON b.author_id = a.id
    JOIN users u ON r.reader_id = u.id
"#;

#[derive(Clone)]
pub struct ReviewsRepository {
    pool: Pool<Postgres>,
}

impl ReviewsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get review by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<BookReview> {
        let query = format!("{} WHERE r.id = $1", SELECT_REVIEW);
        sqlx::query_as::<_, BookReview>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Review with id {} not found", id)))
    }

    /// List reviews for a book, newest first
    pub async fn list_for_book(&self, book_id: i32) -> AppResult<Vec<BookReview>> {
        let query = format!(
            "{} WHERE r.book_id = $1 ORDER BY r.created_at DESC, r.id DESC",
            SELECT_REVIEW
        );
        let reviews = sqlx::query_as::<_, BookReview>(&query)
            .bind(book_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(reviews)
    }

    /// List all reviews, newest first
    pub async fn list(&self) -> AppResult<Vec<BookReview>> {
        let query = format!("{} ORDER BY r.created_at DESC, r.id DESC", SELECT_REVIEW);
        let reviews = sqlx::query_as::<_, BookReview>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(reviews)
    }

    /// Create a new review. created_at is set by the database at insert
    /// and never updated afterwards.
    pub async fn create(&self, review: &CreateBookReview) -> AppResult<BookReview> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO book_reviews (book_id, reader_id, content)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(review.book_id)
        .bind(review.reader_id)
        .bind(&review.content)
        .fetch_one(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    /// Delete a review
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM book_reviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Review with id {} not found", id)));
        }
        Ok(())
    }
}
