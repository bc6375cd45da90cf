//! Genre model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::Link;

/// Genre model from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Genre {
    pub id: i32,
    pub name: String,
}

impl Genre {
    /// Navigational reference to the book listing filtered by this genre
    pub fn filtered_books_link(&self) -> Link {
        Link::new(format!("/books?genre_id={}", self.id), self.name.clone())
    }
}

impl std::fmt::Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Create genre request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateGenre {
    pub name: String,
}

/// Update genre request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateGenre {
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filtered_books_link() {
        let genre = Genre {
            id: 7,
            name: "Fantasy".to_string(),
        };
        let link = genre.filtered_books_link();
        assert_eq!(link.href, "/books?genre_id=7");
        assert_eq!(link.label, "Fantasy");
    }

    #[test]
    fn test_display() {
        let genre = Genre {
            id: 1,
            name: "Science Fiction".to_string(),
        };
        assert_eq!(genre.to_string(), "Science Fiction");
    }
}
