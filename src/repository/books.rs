//! Books repository for database operations

use sqlx::{FromRow, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookQuery, CreateBook, UpdateBook},
        genre::Genre,
    },
};

/// Row shape for the per-book genre fetch
#[derive(FromRow)]
struct BookGenreRow {
    book_id: i32,
    id: i32,
    name: String,
}

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get book by ID with its author name and genres (association order)
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        let mut book = sqlx::query_as::<_, Book>(
            r#"
            SELECT b.id, b.title, b.summary, b.isbn, b.author_id, b.cover,
                   a.first_name || ' ' || a.last_name AS author_name
            FROM books b
            LEFT JOIN authors a ON b.author_id = a.id
            WHERE b.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;

        book.genres = sqlx::query_as::<_, Genre>(
            r#"
            SELECT g.id, g.name
            FROM book_genres bg
            JOIN genres g ON bg.genre_id = g.id
            WHERE bg.book_id = $1
            ORDER BY bg.position
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(book)
    }

    /// Search books with pagination
    pub async fn search(&self, query: &BookQuery) -> AppResult<(Vec<Book>, i64)> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;

        let mut conditions = Vec::new();
        let mut params: Vec<String> = Vec::new();

        if let Some(ref title) = query.title {
            params.push(format!("%{}%", title.to_lowercase()));
            conditions.push(format!("LOWER(b.title) LIKE ${}", params.len()));
        }

        if query.genre_id.is_some() {
            conditions.push(format!(
                "EXISTS (SELECT 1 FROM book_genres bg WHERE bg.book_id = b.id AND bg.genre_id = ${})",
                params.len() + 1
            ));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let count_query = format!("SELECT COUNT(*) FROM books b {}", where_clause);
        let mut count_builder = sqlx::query_scalar::<_, i64>(&count_query);
        for param in &params {
            count_builder = count_builder.bind(param);
        }
        if let Some(genre_id) = query.genre_id {
            count_builder = count_builder.bind(genre_id);
        }
        let total = count_builder.fetch_one(&self.pool).await?;

        let select_query = format!(
            r#"
            SELECT b.id, b.title, b.summary, b.isbn, b.author_id, b.cover,
                   a.first_name || ' ' || a.last_name AS author_name
            FROM books b
            LEFT JOIN authors a ON b.author_id = a.id
            {}
            ORDER BY b.title, b.id
            LIMIT {} OFFSET {}
            "#,
            where_clause, per_page, offset
        );

        let mut select_builder = sqlx::query_as::<_, Book>(&select_query);
        for param in &params {
            select_builder = select_builder.bind(param);
        }
        if let Some(genre_id) = query.genre_id {
            select_builder = select_builder.bind(genre_id);
        }
        let mut books = select_builder.fetch_all(&self.pool).await?;

        self.attach_genres(&mut books).await?;

        Ok((books, total))
    }

    /// Populate the genres of each book in one query (association order)
    async fn attach_genres(&self, books: &mut [Book]) -> AppResult<()> {
        if books.is_empty() {
            return Ok(());
        }

        let ids: Vec<i32> = books.iter().map(|b| b.id).collect();
        let rows = sqlx::query_as::<_, BookGenreRow>(
            r#"
            SELECT bg.book_id, g.id, g.name
            FROM book_genres bg
            JOIN genres g ON bg.genre_id = g.id
            WHERE bg.book_id = ANY($1)
            ORDER BY bg.book_id, bg.position
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        for row in rows {
            if let Some(book) = books.iter_mut().find(|b| b.id == row.book_id) {
                book.genres.push(Genre {
                    id: row.id,
                    name: row.name,
                });
            }
        }

        Ok(())
    }

    /// Create a new book and its genre associations
    pub async fn create(&self, book: &CreateBook) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO books (title, summary, isbn, author_id, cover)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&book.title)
        .bind(&book.summary)
        .bind(&book.isbn)
        .bind(book.author_id)
        .bind(&book.cover)
        .fetch_one(&mut *tx)
        .await?;

        for (position, genre_id) in book.genre_ids.iter().enumerate() {
            sqlx::query(
                "INSERT INTO book_genres (book_id, genre_id, position) VALUES ($1, $2, $3)",
            )
            .bind(id)
            .bind(genre_id)
            .bind(position as i32)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.get_by_id(id).await
    }

    /// Update an existing book. Title and summary keep their value when
    /// absent; the nullable isbn, author and cover are written as
    /// submitted so they can be cleared. When genre_ids is present the
    /// genre set is replaced wholesale, preserving the submitted order.
    pub async fn update(&self, id: i32, book: &UpdateBook) -> AppResult<Book> {
        self.get_by_id(id).await?;

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE books
            SET title = COALESCE($1, title),
                summary = COALESCE($2, summary),
                isbn = $3,
                author_id = $4,
                cover = $5
            WHERE id = $6
            "#,
        )
        .bind(&book.title)
        .bind(&book.summary)
        .bind(&book.isbn)
        .bind(book.author_id)
        .bind(&book.cover)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if let Some(ref genre_ids) = book.genre_ids {
            sqlx::query("DELETE FROM book_genres WHERE book_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;

            for (position, genre_id) in genre_ids.iter().enumerate() {
                sqlx::query(
                    "INSERT INTO book_genres (book_id, genre_id, position) VALUES ($1, $2, $3)",
                )
                .bind(id)
                .bind(genre_id)
                .bind(position as i32)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        self.get_by_id(id).await
    }

    /// Delete a book. A copy cannot outlive its title: the book's
    /// instances, reviews and genre associations go with it.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.get_by_id(id).await?;

        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM book_instances WHERE book_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM book_reviews WHERE book_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM book_genres WHERE book_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Total number of books
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
