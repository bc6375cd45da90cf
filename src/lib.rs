//! Libris Library Catalogue Server
//!
//! A Rust implementation of a small library-catalogue web application,
//! exposing the catalogue entities (genres, authors, books, loanable
//! copies, reviews) and user registration over a REST API.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
