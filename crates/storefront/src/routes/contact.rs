//! Contact form route handlers.
//!
//! There is no mail transport wired up; submissions are validated at the
//! boundary and logged for follow-up.

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use terracotta_core::{Email, Phone};

/// Longest accepted message body, matching the form's character counter.
pub const MAX_MESSAGE_LENGTH: usize = 500;

/// Contact form data.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    pub message: String,
}

/// Response for form submissions.
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn failure(message: impl Into<String>) -> (StatusCode, Json<ContactResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ContactResponse {
            success: false,
            message: Some(message.into()),
        }),
    )
}

/// Submit the contact form.
///
/// POST /contact
#[instrument(skip_all, fields(email = %form.email))]
pub async fn submit(Json(form): Json<ContactForm>) -> impl IntoResponse {
    let name = form.name.trim();
    if name.is_empty() {
        return failure("Name is required.");
    }

    let email = match Email::parse(&form.email) {
        Ok(email) => email,
        Err(e) => {
            tracing::debug!(error = %e, "Contact form rejected: bad email");
            return failure("Please enter a valid email address.");
        }
    };

    let phone = match form.phone.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
        Some(raw) => match Phone::parse(raw) {
            Ok(phone) => Some(phone),
            Err(e) => {
                tracing::debug!(error = %e, "Contact form rejected: bad phone");
                return failure("Please enter a valid phone number.");
            }
        },
        None => None,
    };

    let message = form.message.trim();
    if message.is_empty() {
        return failure("Message is required.");
    }
    if message.chars().count() > MAX_MESSAGE_LENGTH {
        return failure(format!(
            "Message must be {MAX_MESSAGE_LENGTH} characters or fewer."
        ));
    }

    // No mail transport; record the submission for follow-up.
    tracing::info!(
        customer_name = name,
        email = %email,
        phone = phone.as_ref().map_or("", Phone::as_str),
        subject = form.subject.as_deref().unwrap_or("general"),
        "Contact form submitted"
    );

    (
        StatusCode::OK,
        Json(ContactResponse {
            success: true,
            message: Some("Thank you! Your message has been sent successfully.".to_owned()),
        }),
    )
}
