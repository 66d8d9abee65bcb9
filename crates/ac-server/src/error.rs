//! Webhook failures, rendered as TwiML so the sender still gets an answer.

use ac_core::error::INLINE_ERROR_LIMIT;
use ac_core::text::truncate_chars;
use ac_core::AcError;
use axum::extract::rejection::{FormRejection, JsonRejection, QueryRejection};
use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::twiml::Twiml;

/// Internal fault while answering a webhook.
///
/// Always answered with HTTP 200 and an `Error: ...` message.
#[derive(Debug)]
pub struct WebhookError {
    pub message: String,
}

impl WebhookError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { message: msg.into() }
    }
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        error!(error = %self.message, "webhook handler failed");
        let text = format!("Error: {}", truncate_chars(&self.message, INLINE_ERROR_LIMIT));
        Twiml(text).into_response()
    }
}

impl From<AcError> for WebhookError {
    fn from(err: AcError) -> Self {
        Self::new(err.to_string())
    }
}

impl From<FormRejection> for WebhookError {
    fn from(rejection: FormRejection) -> Self {
        Self::new(rejection.body_text())
    }
}

impl From<JsonRejection> for WebhookError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.body_text())
    }
}

impl From<QueryRejection> for WebhookError {
    fn from(rejection: QueryRejection) -> Self {
        Self::new(rejection.body_text())
    }
}
