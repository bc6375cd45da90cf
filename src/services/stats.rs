//! Catalogue statistics service

use crate::{
    api::stats::CountsResponse,
    error::AppResult,
    models::book_instance::LoanStatus,
    repository::Repository,
};

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Round-trip a trivial query, used by the readiness endpoint
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.repository.pool)
            .await?;
        Ok(())
    }

    /// Aggregate counts for the public landing page
    pub async fn get_counts(&self) -> AppResult<CountsResponse> {
        Ok(CountsResponse {
            books: self.repository.books.count().await?,
            book_instances: self.repository.book_instances.count().await?,
            book_instances_available: self
                .repository
                .book_instances
                .count_by_status(LoanStatus::Available)
                .await?,
            authors: self.repository.authors.count().await?,
            genres: self.repository.genres.count().await?,
        })
    }
}
