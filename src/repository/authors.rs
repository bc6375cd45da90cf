//! Authors repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::author::{Author, CreateAuthor, UpdateAuthor},
};

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Postgres>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get author by ID, with their book titles in insertion order
    pub async fn get_by_id(&self, id: i32) -> AppResult<Author> {
        let mut author = sqlx::query_as::<_, Author>(
            "SELECT id, first_name, last_name FROM authors WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Author with id {} not found", id)))?;

        author.book_titles =
            sqlx::query_scalar("SELECT title FROM books WHERE author_id = $1 ORDER BY id")
                .bind(id)
                .fetch_all(&self.pool)
                .await?;

        Ok(author)
    }

    /// List all authors in the default ordering (last name, first name)
    pub async fn list(&self) -> AppResult<Vec<Author>> {
        let authors = sqlx::query_as::<_, Author>(
            "SELECT id, first_name, last_name FROM authors ORDER BY last_name, first_name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(authors)
    }

    /// Create a new author
    pub async fn create(&self, author: &CreateAuthor) -> AppResult<Author> {
        let id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO authors (first_name, last_name) VALUES ($1, $2) RETURNING id",
        )
        .bind(&author.first_name)
        .bind(&author.last_name)
        .fetch_one(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    /// Update an existing author
    pub async fn update(&self, id: i32, author: &UpdateAuthor) -> AppResult<Author> {
        if author.first_name.is_some() || author.last_name.is_some() {
            sqlx::query(
                r#"
                UPDATE authors
                SET first_name = COALESCE($1, first_name),
                    last_name = COALESCE($2, last_name)
                WHERE id = $3
                "#,
            )
            .bind(&author.first_name)
            .bind(&author.last_name)
            .bind(id)
            .execute(&self.pool)
            .await?;
        }

        self.get_by_id(id).await
    }

    /// Delete an author. Their books survive with author set to null;
    /// the delete never cascades to the books.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.get_by_id(id).await?;

        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE books SET author_id = NULL WHERE author_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Total number of authors
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
