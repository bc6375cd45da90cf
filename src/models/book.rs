//! Book (catalogue title) model and related types.
//!
//! A Book is the catalogued title; the loanable physical copies are
//! `BookInstance` records. The summary is an opaque formatted-text blob;
//! sanitization and rendering are the front end's concern.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use super::{genre::Genre, Link};

/// Full book model from database.
///
/// `author_name` and `genres` are computed fields populated by the
/// repository (author via JOIN, genres by a follow-up query in
/// association order). They default to empty when the book is read
/// without its relations.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub summary: String,
    pub isbn: Option<String>,
    pub author_id: Option<i32>,
    pub cover: Option<String>,
    #[sqlx(default)]
    #[serde(default)]
    pub author_name: Option<String>,
    #[sqlx(skip)]
    #[serde(default)]
    pub genres: Vec<Genre>,
}

impl Book {
    /// Comma-joined names of at most the first 3 associated genres,
    /// in association order. The cap keeps admin listings compact.
    pub fn display_genre(&self) -> String {
        self.genres
            .iter()
            .take(3)
            .map(|genre| genre.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Navigational reference to the author's detail view.
    ///
    /// Returns `None` for books without an author.
    pub fn author_link(&self) -> Option<Link> {
        self.author_id.map(|id| {
            Link::new(
                format!("/authors/{}", id),
                self.author_name.clone().unwrap_or_default(),
            )
        })
    }
}

impl std::fmt::Display for Book {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - {}",
            self.author_name.as_deref().unwrap_or_default(),
            self.title
        )
    }
}

/// Create book request.
///
/// A book may be created with no genres; the admin front end asks for at
/// least one, but the model does not enforce it.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBook {
    pub title: String,
    #[serde(default)]
    pub summary: String,
    pub isbn: Option<String>,
    pub author_id: Option<i32>,
    pub cover: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<i32>,
}

/// Update book request. The nullable isbn, author and cover are replaced
/// with the submitted values (absent clears them); title, summary and
/// genres are kept when absent.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateBook {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub isbn: Option<String>,
    pub author_id: Option<i32>,
    pub cover: Option<String>,
    pub genre_ids: Option<Vec<i32>>,
}

/// Book search/pagination query
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct BookQuery {
    /// Search in title
    pub title: Option<String>,
    /// Restrict to books tagged with this genre
    pub genre_id: Option<i32>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}
