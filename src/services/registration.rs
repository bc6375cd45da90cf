//! User registration service.
//!
//! The validation itself is a pure function over the submitted form and
//! the already-known existence of the username/email; all applicable
//! checks run and every failure is collected, not just the first. The
//! service wraps it with the repository lookups and, on success, the
//! actual account creation.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::ValidateEmail;

use crate::{
    error::{AppError, AppResult},
    models::user::{CreateUser, User},
    repository::Repository,
};

/// Registration failure notices. All are advisory user-input errors,
/// surfaced directly to the submitter; none is fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum RegistrationError {
    DuplicateOrMissingUsername,
    DuplicateOrMissingEmail,
    InvalidEmailFormat,
    PasswordMissingOrMismatched,
}

impl RegistrationError {
    /// Human-readable notice shown on the registration form
    pub fn message(&self) -> &'static str {
        match self {
            RegistrationError::DuplicateOrMissingUsername => {
                "Username not entered or username already exists."
            }
            RegistrationError::DuplicateOrMissingEmail => {
                "Email not entered or user with this Email already exists."
            }
            RegistrationError::InvalidEmailFormat => "Invalid Email.",
            RegistrationError::PasswordMissingOrMismatched => {
                "Passwords not entered or passwords do not match."
            }
        }
    }
}

/// Raw registration submission; any field may be absent or empty
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct RegistrationForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub password2: String,
}

/// Result of a registration attempt
#[derive(Debug)]
pub enum RegistrationOutcome {
    Registered(User),
    Rejected(Vec<RegistrationError>),
}

/// Validate a registration submission against the known state of the
/// user store. Checks are evaluated independently per field; the email
/// format check only runs when the presence/uniqueness check passed, so
/// a taken-but-malformed email reports only the duplicate notice.
pub fn validate(
    form: &RegistrationForm,
    username_taken: bool,
    email_taken: bool,
) -> Vec<RegistrationError> {
    let mut errors = Vec::new();

    if form.username.is_empty() || username_taken {
        errors.push(RegistrationError::DuplicateOrMissingUsername);
    }

    if form.email.is_empty() || email_taken {
        errors.push(RegistrationError::DuplicateOrMissingEmail);
    } else if !form.email.validate_email() {
        errors.push(RegistrationError::InvalidEmailFormat);
    }

    if form.password.is_empty() || form.password2.is_empty() || form.password != form.password2 {
        errors.push(RegistrationError::PasswordMissingOrMismatched);
    }

    errors
}

#[derive(Clone)]
pub struct RegistrationService {
    repository: Repository,
}

impl RegistrationService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Validate a submission and, when it passes, create the account.
    ///
    /// Uniqueness is read-then-write; concurrent duplicate submissions
    /// fall through to the DB unique constraints.
    pub async fn register(&self, form: &RegistrationForm) -> AppResult<RegistrationOutcome> {
        let username_taken = !form.username.is_empty()
            && self.repository.users.username_exists(&form.username).await?;
        let email_taken =
            !form.email.is_empty() && self.repository.users.email_exists(&form.email).await?;

        let errors = validate(form, username_taken, email_taken);
        if !errors.is_empty() {
            return Ok(RegistrationOutcome::Rejected(errors));
        }

        let password = self.hash_password(&form.password)?;
        let user = self
            .repository
            .users
            .create(
                &CreateUser {
                    username: form.username.clone(),
                    email: form.email.clone(),
                    password: None,
                    first_name: None,
                    last_name: None,
                },
                Some(password),
            )
            .await?;

        tracing::info!("Registered user {} (id {})", user.username, user.id);
        Ok(RegistrationOutcome::Registered(user))
    }

    /// Hash a password using Argon2
    fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(username: &str, email: &str, password: &str, password2: &str) -> RegistrationForm {
        RegistrationForm {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            password2: password2.to_string(),
        }
    }

    #[test]
    fn test_valid_submission() {
        let errors = validate(
            &form("newuser", "new@example.com", "secret123", "secret123"),
            false,
            false,
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn test_empty_username() {
        let errors = validate(
            &form("", "new@example.com", "secret123", "secret123"),
            false,
            false,
        );
        assert_eq!(errors, vec![RegistrationError::DuplicateOrMissingUsername]);
    }

    #[test]
    fn test_taken_username() {
        let errors = validate(
            &form("existing", "new@example.com", "secret123", "secret123"),
            true,
            false,
        );
        assert_eq!(errors, vec![RegistrationError::DuplicateOrMissingUsername]);
    }

    #[test]
    fn test_empty_email() {
        let errors = validate(&form("newuser", "", "secret123", "secret123"), false, false);
        assert_eq!(errors, vec![RegistrationError::DuplicateOrMissingEmail]);
    }

    #[test]
    fn test_malformed_email() {
        let errors = validate(
            &form("newuser", "not-an-email", "secret123", "secret123"),
            false,
            false,
        );
        assert_eq!(errors, vec![RegistrationError::InvalidEmailFormat]);
    }

    #[test]
    fn test_taken_and_malformed_email_reports_only_duplicate() {
        // the format check is skipped when the existence check fails
        let errors = validate(
            &form("newuser", "not-an-email", "secret123", "secret123"),
            false,
            true,
        );
        assert_eq!(errors, vec![RegistrationError::DuplicateOrMissingEmail]);
    }

    #[test]
    fn test_password_mismatch() {
        let errors = validate(&form("newuser", "new@example.com", "a", "b"), false, false);
        assert_eq!(errors, vec![RegistrationError::PasswordMissingOrMismatched]);
    }

    #[test]
    fn test_missing_passwords() {
        let errors = validate(&form("newuser", "new@example.com", "", ""), false, false);
        assert_eq!(errors, vec![RegistrationError::PasswordMissingOrMismatched]);

        let errors = validate(
            &form("newuser", "new@example.com", "secret123", ""),
            false,
            false,
        );
        assert_eq!(errors, vec![RegistrationError::PasswordMissingOrMismatched]);
    }

    #[test]
    fn test_all_failures_are_collected() {
        let errors = validate(&form("", "", "a", "b"), false, false);
        assert_eq!(
            errors,
            vec![
                RegistrationError::DuplicateOrMissingUsername,
                RegistrationError::DuplicateOrMissingEmail,
                RegistrationError::PasswordMissingOrMismatched,
            ]
        );
    }
}
