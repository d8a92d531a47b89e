//! Newsletter subscription route handlers.
//!
//! Subscriptions are validated and logged; there is no mailing-list
//! provider behind this endpoint.

use axum::{Form, Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use terracotta_core::Email;

/// Newsletter subscription form data.
#[derive(Debug, Deserialize)]
pub struct SubscribeForm {
    pub email: String,
}

/// Response for subscription attempts.
#[derive(Debug, Serialize)]
pub struct SubscribeResponse {
    pub success: bool,
    pub message: String,
}

/// Subscribe to the newsletter.
///
/// POST /newsletter/subscribe
#[instrument(skip_all, fields(email = %form.email))]
pub async fn subscribe(Form(form): Form<SubscribeForm>) -> impl IntoResponse {
    match Email::parse(&form.email) {
        Ok(email) => {
            tracing::info!(email = %email, "Newsletter subscription recorded");
            (
                StatusCode::OK,
                Json(SubscribeResponse {
                    success: true,
                    message: "Thank you for subscribing!".to_owned(),
                }),
            )
        }
        Err(e) => {
            tracing::debug!(error = %e, "Newsletter subscription rejected");
            (
                StatusCode::BAD_REQUEST,
                Json(SubscribeResponse {
                    success: false,
                    message: "Please enter a valid email address.".to_owned(),
                }),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::response::IntoResponse;

    use super::*;

    async fn subscribe_status(email: &str) -> StatusCode {
        let form = SubscribeForm {
            email: email.to_owned(),
        };
        subscribe(Form(form)).await.into_response().status()
    }

    #[tokio::test]
    async fn test_valid_email_subscribes() {
        assert_eq!(subscribe_status("avery@example.com").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_invalid_email_rejected() {
        assert_eq!(
            subscribe_status("not-an-email").await,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(subscribe_status("").await, StatusCode::BAD_REQUEST);
    }
}
