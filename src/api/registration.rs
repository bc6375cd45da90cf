//! User registration endpoint.
//!
//! Accepts the form-encoded submission of the public registration page.
//! Failures come back as advisory notices for the form to redisplay,
//! one per collected validation error; they are not API errors.

use axum::{extract::State, http::StatusCode, Form, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    services::registration::{RegistrationForm, RegistrationOutcome},
};

/// Registration result notices
#[derive(Serialize, ToSchema)]
pub struct RegistrationResponse {
    pub success: bool,
    /// Human-readable notices to show on the form
    pub messages: Vec<String>,
}

/// Register a new user account
#[utoipa::path(
    post,
    path = "/register",
    tag = "registration",
    request_body(content = RegistrationForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Registration successful", body = RegistrationResponse),
        (status = 400, description = "Registration rejected", body = RegistrationResponse)
    )
)]
pub async fn register(
    State(state): State<crate::AppState>,
    Form(form): Form<RegistrationForm>,
) -> AppResult<(StatusCode, Json<RegistrationResponse>)> {
    match state.services.registration.register(&form).await? {
        RegistrationOutcome::Registered(_user) => Ok((
            StatusCode::OK,
            Json(RegistrationResponse {
                success: true,
                messages: vec![
                    "User registration successful. You can log in now.".to_string(),
                ],
            }),
        )),
        RegistrationOutcome::Rejected(errors) => Ok((
            StatusCode::BAD_REQUEST,
            Json(RegistrationResponse {
                success: false,
                messages: errors.iter().map(|e| e.message().to_string()).collect(),
            }),
        )),
    }
}
