//! Catalogue service: genres, authors, books, copies and reviews.
//!
//! Thin orchestration over the repositories plus the field-shape checks
//! the model requires (non-empty genre name, ISBN length). Referential
//! integrity on delete lives in the repository layer.

use crate::{
    error::{AppError, AppResult},
    models::{
        author::{Author, CreateAuthor, UpdateAuthor},
        book::{Book, BookQuery, CreateBook, UpdateBook},
        book_instance::{BookInstance, BookInstanceQuery, CreateBookInstance, UpdateBookInstance},
        genre::{CreateGenre, Genre, UpdateGenre},
        review::{BookReview, CreateBookReview},
        user::User,
    },
    repository::Repository,
};

const ISBN_MAX_LEN: usize = 13;

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    // ---- Genres ----

    pub async fn list_genres(&self) -> AppResult<Vec<Genre>> {
        self.repository.genres.list().await
    }

    pub async fn get_genre(&self, id: i32) -> AppResult<Genre> {
        self.repository.genres.get_by_id(id).await
    }

    pub async fn create_genre(&self, genre: CreateGenre) -> AppResult<Genre> {
        if genre.name.trim().is_empty() {
            return Err(AppError::Validation("Genre name must not be empty".to_string()));
        }
        self.repository.genres.create(&genre).await
    }

    pub async fn update_genre(&self, id: i32, genre: UpdateGenre) -> AppResult<Genre> {
        if let Some(ref name) = genre.name {
            if name.trim().is_empty() {
                return Err(AppError::Validation("Genre name must not be empty".to_string()));
            }
        }
        self.repository.genres.update(id, &genre).await
    }

    pub async fn delete_genre(&self, id: i32) -> AppResult<()> {
        self.repository.genres.delete(id).await?;
        tracing::info!("Deleted genre {}", id);
        Ok(())
    }

    // ---- Authors ----

    pub async fn list_authors(&self) -> AppResult<Vec<Author>> {
        self.repository.authors.list().await
    }

    pub async fn get_author(&self, id: i32) -> AppResult<Author> {
        self.repository.authors.get_by_id(id).await
    }

    pub async fn create_author(&self, author: CreateAuthor) -> AppResult<Author> {
        self.repository.authors.create(&author).await
    }

    pub async fn update_author(&self, id: i32, author: UpdateAuthor) -> AppResult<Author> {
        self.repository.authors.update(id, &author).await
    }

    /// Delete an author; their books survive with author nulled out
    pub async fn delete_author(&self, id: i32) -> AppResult<()> {
        self.repository.authors.delete(id).await?;
        tracing::info!("Deleted author {}", id);
        Ok(())
    }

    // ---- Books ----

    pub async fn search_books(&self, query: &BookQuery) -> AppResult<(Vec<Book>, i64)> {
        self.repository.books.search(query).await
    }

    pub async fn get_book(&self, id: i32) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    pub async fn create_book(&self, book: CreateBook) -> AppResult<Book> {
        Self::check_title(&book.title)?;
        Self::check_isbn(book.isbn.as_deref())?;
        self.repository.books.create(&book).await
    }

    pub async fn update_book(&self, id: i32, book: UpdateBook) -> AppResult<Book> {
        if let Some(ref title) = book.title {
            Self::check_title(title)?;
        }
        Self::check_isbn(book.isbn.as_deref())?;
        self.repository.books.update(id, &book).await
    }

    /// Delete a book together with its copies and reviews
    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        self.repository.books.delete(id).await?;
        tracing::info!("Deleted book {} with its copies and reviews", id);
        Ok(())
    }

    fn check_title(title: &str) -> AppResult<()> {
        if title.trim().is_empty() {
            return Err(AppError::Validation("Book title must not be empty".to_string()));
        }
        Ok(())
    }

    fn check_isbn(isbn: Option<&str>) -> AppResult<()> {
        if let Some(isbn) = isbn {
            if isbn.len() > ISBN_MAX_LEN {
                return Err(AppError::Validation(format!(
                    "ISBN must be at most {} characters",
                    ISBN_MAX_LEN
                )));
            }
        }
        Ok(())
    }

    // ---- Book instances ----

    pub async fn search_book_instances(
        &self,
        query: &BookInstanceQuery,
    ) -> AppResult<(Vec<BookInstance>, i64)> {
        self.repository.book_instances.search(query).await
    }

    pub async fn get_book_instance(&self, id: i32) -> AppResult<BookInstance> {
        self.repository.book_instances.get_by_id(id).await
    }

    pub async fn create_book_instance(
        &self,
        instance: CreateBookInstance,
    ) -> AppResult<BookInstance> {
        // the referenced book must exist
        self.repository.books.get_by_id(instance.book_id).await?;
        self.repository.book_instances.create(&instance).await
    }

    pub async fn update_book_instance(
        &self,
        id: i32,
        instance: UpdateBookInstance,
    ) -> AppResult<BookInstance> {
        if let Some(reader_id) = instance.reader_id {
            self.repository.users.get_by_id(reader_id).await?;
        }
        self.repository.book_instances.update(id, &instance).await
    }

    pub async fn delete_book_instance(&self, id: i32) -> AppResult<()> {
        self.repository.book_instances.delete(id).await
    }

    // ---- Reviews ----

    pub async fn list_reviews(&self) -> AppResult<Vec<BookReview>> {
        self.repository.reviews.list().await
    }

    pub async fn list_reviews_for_book(&self, book_id: i32) -> AppResult<Vec<BookReview>> {
        self.repository.books.get_by_id(book_id).await?;
        self.repository.reviews.list_for_book(book_id).await
    }

    pub async fn create_review(&self, review: CreateBookReview) -> AppResult<BookReview> {
        self.repository.books.get_by_id(review.book_id).await?;
        self.repository.users.get_by_id(review.reader_id).await?;
        self.repository.reviews.create(&review).await
    }

    pub async fn delete_review(&self, id: i32) -> AppResult<()> {
        self.repository.reviews.delete(id).await
    }

    // ---- Users (readers) ----

    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repository.users.list().await
    }

    pub async fn get_user(&self, id: i32) -> AppResult<User> {
        self.repository.users.get_by_id(id).await
    }

    /// Delete a user; held copies keep existing with the reader nulled
    /// out, their reviews go with them
    pub async fn delete_user(&self, id: i32) -> AppResult<()> {
        self.repository.users.delete(id).await?;
        tracing::info!("Deleted user {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_title_rejects_empty_and_whitespace() {
        assert!(CatalogService::check_title("").is_err());
        assert!(CatalogService::check_title("   ").is_err());
        assert!(CatalogService::check_title("Altorių šešėly").is_ok());
    }

    #[test]
    fn test_check_isbn_length() {
        assert!(CatalogService::check_isbn(None).is_ok());
        assert!(CatalogService::check_isbn(Some("9786094661662")).is_ok());
        assert!(CatalogService::check_isbn(Some("97860946616625")).is_err());
    }
}
