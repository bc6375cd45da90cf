//! Book instances repository for database operations

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::book_instance::{
        BookInstance, BookInstanceQuery, CreateBookInstance, LoanStatus, UpdateBookInstance,
    },
};

const SELECT_INSTANCE: &str = r#"
    SELECT bi.id, bi.unique_id, bi.book_id, bi.due_back, bi.status, bi.reader_id,
           b.title AS book_title,
           u.username AS reader_username
    FROM book_instances bi
    JOIN books b ON bi.book_id = b.id
    LEFT JOIN users u ON bi.reader_id = u.id
"#;

#[derive(Clone)]
pub struct BookInstancesRepository {
    pool: Pool<Postgres>,
}

impl BookInstancesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get book instance by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<BookInstance> {
        let query = format!("{} WHERE bi.id = $1", SELECT_INSTANCE);
        sqlx::query_as::<_, BookInstance>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book instance with id {} not found", id)))
    }

    /// Search book instances with filters and pagination.
    ///
    /// The free-text search covers the copy's unique_id, the book title,
    /// the author's last name and the reader's last name. Default
    /// ordering is by due_back.
    pub async fn search(&self, query: &BookInstanceQuery) -> AppResult<(Vec<BookInstance>, i64)> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;

        let mut conditions = Vec::new();
        let mut params: Vec<String> = Vec::new();

        if let Some(status) = query.status {
            params.push(status.as_code().to_string());
            conditions.push(format!("bi.status = ${}", params.len()));
        }

        if let Some(due_before) = query.due_before {
            params.push(due_before.to_string());
            conditions.push(format!("bi.due_back <= ${}::date", params.len()));
        }

        if let Some(ref search) = query.search {
            params.push(format!("%{}%", search.to_lowercase()));
            let i = params.len();
            conditions.push(format!(
                "(bi.unique_id::text LIKE ${i} \
                 OR LOWER(b.title) LIKE ${i} \
                 OR LOWER(a.last_name) LIKE ${i} \
                 OR LOWER(u.last_name) LIKE ${i})"
            ));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let count_query = format!(
            r#"
            SELECT COUNT(*)
            FROM book_instances bi
            JOIN books b ON bi.book_id = b.id
            LEFT JOIN authors a ON b.author_id = a.id
            LEFT JOIN users u ON bi.reader_id = u.id
            {}
            "#,
            where_clause
        );
        let mut count_builder = sqlx::query_scalar::<_, i64>(&count_query);
        for param in &params {
            count_builder = count_builder.bind(param);
        }
        let total = count_builder.fetch_one(&self.pool).await?;

        let select_query = format!(
            r#"
            SELECT bi.id, bi.unique_id, bi.book_id, bi.due_back, bi.status, bi.reader_id,
                   b.title AS book_title,
                   u.username AS reader_username
            FROM book_instances bi
            JOIN books b ON bi.book_id = b.id
            LEFT JOIN authors a ON b.author_id = a.id
            LEFT JOIN users u ON bi.reader_id = u.id
            {}
            ORDER BY bi.due_back, bi.id
            LIMIT {} OFFSET {}
            "#,
            where_clause, per_page, offset
        );
        let mut select_builder = sqlx::query_as::<_, BookInstance>(&select_query);
        for param in &params {
            select_builder = select_builder.bind(param);
        }
        let instances = select_builder.fetch_all(&self.pool).await?;

        Ok((instances, total))
    }

    /// Create a new book instance. The unique_id is generated here, once,
    /// and is never reassigned afterwards.
    pub async fn create(&self, instance: &CreateBookInstance) -> AppResult<BookInstance> {
        let unique_id = Uuid::new_v4();
        let status = instance.status.unwrap_or_default();

        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO book_instances (unique_id, book_id, due_back, status, reader_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(unique_id)
        .bind(instance.book_id)
        .bind(instance.due_back)
        .bind(status.as_code())
        .bind(instance.reader_id)
        .fetch_one(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    /// Update an existing book instance (status, due date, reader).
    /// due_back and reader are written as submitted, so returning a copy
    /// clears both. The unique_id is immutable and is never part of the
    /// update.
    pub async fn update(&self, id: i32, instance: &UpdateBookInstance) -> AppResult<BookInstance> {
        self.get_by_id(id).await?;

        sqlx::query(
            r#"
            UPDATE book_instances
            SET due_back = $1,
                status = COALESCE($2, status),
                reader_id = $3
            WHERE id = $4
            "#,
        )
        .bind(instance.due_back)
        .bind(instance.status.map(|s| s.as_code()))
        .bind(instance.reader_id)
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    /// Delete a book instance
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM book_instances WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Book instance with id {} not found",
                id
            )));
        }
        Ok(())
    }

    /// Total number of copies
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book_instances")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Number of copies in a given loan status
    pub async fn count_by_status(&self, status: LoanStatus) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM book_instances WHERE status = $1")
                .bind(status.as_code())
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}
