//! Book instance (loanable copy) model and related types

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Loan status of a copy.
///
/// A plain enumeration with no transition rules: the status is changed
/// only by direct administrative edit. DB stores the one-char code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum LoanStatus {
    #[serde(rename = "m")]
    Managed,
    #[serde(rename = "t")]
    Taken,
    #[serde(rename = "a")]
    Available,
    #[serde(rename = "r")]
    Reserved,
}

impl LoanStatus {
    /// Return the one-char DB code for this status
    pub fn as_code(&self) -> &'static str {
        match self {
            LoanStatus::Managed => "m",
            LoanStatus::Taken => "t",
            LoanStatus::Available => "a",
            LoanStatus::Reserved => "r",
        }
    }
}

impl From<&str> for LoanStatus {
    fn from(s: &str) -> Self {
        match s {
            "t" => LoanStatus::Taken,
            "a" => LoanStatus::Available,
            "r" => LoanStatus::Reserved,
            _ => LoanStatus::Managed,
        }
    }
}

impl Default for LoanStatus {
    fn default() -> Self {
        LoanStatus::Managed
    }
}

impl std::fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_code())
    }
}

/// Full book instance model from database.
///
/// `unique_id` is generated once at creation and never reassigned.
/// `book_title` and `reader_username` are computed fields populated when
/// queried with JOINs, None otherwise.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookInstance {
    pub id: i32,
    pub unique_id: Uuid,
    pub book_id: i32,
    pub due_back: Option<NaiveDate>,
    pub status: String, // one-char loan status code
    pub reader_id: Option<i32>,
    #[sqlx(default)]
    #[serde(default)]
    pub book_title: Option<String>,
    #[sqlx(default)]
    #[serde(default)]
    pub reader_username: Option<String>,
}

impl BookInstance {
    /// Typed view of the raw status code
    pub fn loan_status(&self) -> LoanStatus {
        LoanStatus::from(self.status.as_str())
    }

    /// True when the copy has a due date in the past. Computed on read,
    /// never stored.
    pub fn is_overdue(&self) -> bool {
        self.is_overdue_on(Utc::now().date_naive())
    }

    /// Overdue predicate against an explicit reference date
    pub fn is_overdue_on(&self, today: NaiveDate) -> bool {
        matches!(self.due_back, Some(due) if due < today)
    }
}

impl std::fmt::Display for BookInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.unique_id,
            self.book_title.as_deref().unwrap_or_default()
        )
    }
}

/// Create book instance request. The unique_id is server-generated.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBookInstance {
    pub book_id: i32,
    pub due_back: Option<NaiveDate>,
    pub status: Option<LoanStatus>,
    pub reader_id: Option<i32>,
}

/// Update book instance request. The due date and reader are replaced
/// with the submitted values (absent clears them, which is how a copy is
/// returned); the status is kept when absent. The unique_id is immutable
/// and is deliberately absent here.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateBookInstance {
    pub due_back: Option<NaiveDate>,
    pub status: Option<LoanStatus>,
    pub reader_id: Option<i32>,
}

/// Book instance search/filter query (admin listing)
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct BookInstanceQuery {
    /// Filter by loan status code
    pub status: Option<LoanStatus>,
    /// Only copies due on or before this date
    pub due_before: Option<NaiveDate>,
    /// Search across unique_id, book title, author last name, reader last name
    pub search: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance(due_back: Option<NaiveDate>) -> BookInstance {
        BookInstance {
            id: 1,
            unique_id: Uuid::parse_str("123e4567-e89b-12d3-a456-426614174000").unwrap(),
            book_id: 1,
            due_back,
            status: "a".to_string(),
            reader_id: None,
            book_title: Some("Dune".to_string()),
            reader_username: None,
        }
    }

    #[test]
    fn test_loan_status_codes() {
        assert_eq!(LoanStatus::Managed.as_code(), "m");
        assert_eq!(LoanStatus::from("t"), LoanStatus::Taken);
        assert_eq!(LoanStatus::from("a"), LoanStatus::Available);
        assert_eq!(LoanStatus::from("r"), LoanStatus::Reserved);
        // unknown codes normalize to the default
        assert_eq!(LoanStatus::from("x"), LoanStatus::Managed);
        assert_eq!(LoanStatus::default(), LoanStatus::Managed);
    }

    #[test]
    fn test_is_overdue() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();

        let past = instance(NaiveDate::from_ymd_opt(2024, 6, 14));
        assert!(past.is_overdue_on(today));

        let due_today = instance(NaiveDate::from_ymd_opt(2024, 6, 15));
        assert!(!due_today.is_overdue_on(today));

        let future = instance(NaiveDate::from_ymd_opt(2024, 6, 16));
        assert!(!future.is_overdue_on(today));
    }

    #[test]
    fn test_is_overdue_no_due_date() {
        let copy = instance(None);
        assert!(!copy.is_overdue_on(NaiveDate::from_ymd_opt(2099, 1, 1).unwrap()));
        assert!(!copy.is_overdue());
    }

    #[test]
    fn test_display() {
        let copy = instance(None);
        assert_eq!(
            copy.to_string(),
            "123e4567-e89b-12d3-a456-426614174000: Dune"
        );
    }
}
