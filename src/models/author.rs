//! Author model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::Link;

/// Full author model from database.
///
/// `book_titles` is a computed field populated by the repository when the
/// author is fetched with their books; it is empty otherwise.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    #[sqlx(default)]
    #[serde(default)]
    pub book_titles: Vec<String>,
}

impl Author {
    /// "first last" form used for labels
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Comma-joined titles of this author's books
    pub fn display_books(&self) -> String {
        self.book_titles.join(", ")
    }

    /// Navigational reference to this author's detail view
    pub fn link(&self) -> Link {
        Link::new(format!("/authors/{}", self.id), self.full_name())
    }
}

impl std::fmt::Display for Author {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}

/// Create author request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAuthor {
    pub first_name: String,
    pub last_name: String,
}

/// Update author request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateAuthor {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author() -> Author {
        Author {
            id: 3,
            first_name: "Frank".to_string(),
            last_name: "Herbert".to_string(),
            book_titles: vec!["Dune".to_string(), "Dune Messiah".to_string()],
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(author().to_string(), "Frank Herbert");
    }

    #[test]
    fn test_display_books() {
        assert_eq!(author().display_books(), "Dune, Dune Messiah");

        let no_books = Author {
            book_titles: vec![],
            ..author()
        };
        assert_eq!(no_books.display_books(), "");
    }

    #[test]
    fn test_link() {
        let link = author().link();
        assert_eq!(link.href, "/authors/3");
        assert_eq!(link.label, "Frank Herbert");
    }
}
