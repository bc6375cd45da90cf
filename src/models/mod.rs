//! Data models for catalogue entities

pub mod author;
pub mod book;
pub mod book_instance;
pub mod genre;
pub mod review;
pub mod user;

use serde::Serialize;
use utoipa::ToSchema;

/// Navigational reference produced by the display helpers.
///
/// The href is a path relative to the application root; turning it into
/// a concrete anchor is the rendering layer's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Link {
    pub href: String,
    pub label: String,
}

impl Link {
    pub fn new(href: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            label: label.into(),
        }
    }
}
