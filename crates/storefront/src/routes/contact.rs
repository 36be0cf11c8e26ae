//! Contact form route handlers.
//!
//! Messages are validated and written to the log; there is no mail relay.

use agrimart_core::Email;
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Longest accepted message body, in characters.
pub const MAX_MESSAGE_LEN: usize = 5000;

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

/// Response for form submission.
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ContactResponse {
    fn rejected(message: &str) -> (StatusCode, Json<Self>) {
        (
            StatusCode::BAD_REQUEST,
            Json(Self {
                success: false,
                message: Some(message.to_string()),
            }),
        )
    }
}

/// Submit a contact message.
///
/// POST /contact
#[instrument(skip(form), fields(email = %form.email))]
pub async fn submit(Json(form): Json<ContactForm>) -> impl IntoResponse {
    let Ok(email) = Email::parse(&form.email) else {
        return ContactResponse::rejected("Please enter a valid email address.");
    };

    let name = form.name.trim();
    let message = form.message.trim();
    if name.is_empty() || message.is_empty() {
        return ContactResponse::rejected("Name and message are required.");
    }
    if message.chars().count() > MAX_MESSAGE_LEN {
        return ContactResponse::rejected("Message is too long.");
    }

    tracing::info!(
        email = %email,
        name = %name,
        phone = form.phone.as_deref().unwrap_or("").trim(),
        subject = form.subject.as_deref().unwrap_or("").trim(),
        message = %message,
        "Contact message received"
    );

    (
        StatusCode::OK,
        Json(ContactResponse {
            success: true,
            message: None,
        }),
    )
}
