//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{
    authors, book_instances, books, genres, health, registration, reviews, stats, users,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Libris API",
        version = "0.3.0",
        description = "Library Catalogue REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Genres
        genres::list_genres,
        genres::get_genre,
        genres::create_genre,
        genres::update_genre,
        genres::delete_genre,
        // Authors
        authors::list_authors,
        authors::get_author,
        authors::create_author,
        authors::update_author,
        authors::delete_author,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        // Book instances
        book_instances::list_book_instances,
        book_instances::get_book_instance,
        book_instances::create_book_instance,
        book_instances::update_book_instance,
        book_instances::delete_book_instance,
        // Reviews
        reviews::list_reviews,
        reviews::list_book_reviews,
        reviews::create_review,
        reviews::delete_review,
        // Users
        users::list_users,
        users::get_user,
        users::delete_user,
        // Registration
        registration::register,
        // Stats
        stats::get_counts,
    ),
    components(
        schemas(
            crate::models::Link,
            crate::models::genre::Genre,
            crate::models::genre::CreateGenre,
            crate::models::genre::UpdateGenre,
            crate::models::author::Author,
            crate::models::author::CreateAuthor,
            crate::models::author::UpdateAuthor,
            crate::models::book::Book,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            crate::models::book_instance::BookInstance,
            crate::models::book_instance::CreateBookInstance,
            crate::models::book_instance::UpdateBookInstance,
            crate::models::book_instance::LoanStatus,
            crate::models::review::BookReview,
            crate::models::review::CreateBookReview,
            crate::models::user::User,
            crate::models::user::CreateUser,
            crate::services::registration::RegistrationForm,
            crate::services::registration::RegistrationError,
            registration::RegistrationResponse,
            stats::CountsResponse,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "genres", description = "Genre management"),
        (name = "authors", description = "Author management"),
        (name = "books", description = "Book management"),
        (name = "book-instances", description = "Loanable copy management"),
        (name = "reviews", description = "Book reviews"),
        (name = "users", description = "Reader accounts"),
        (name = "registration", description = "User registration"),
        (name = "stats", description = "Catalogue statistics")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
