//! Twilio reply envelope.

use axum::http::header;
use axum::response::{IntoResponse, Response};
use quick_xml::escape::escape;

pub const CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// Wrap `message` in a single `<Message>` TwiML document.
pub fn envelope(message: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><Response><Message>{}</Message></Response>"#,
        escape(message)
    )
}

/// Reply text served as a TwiML response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Twiml(pub String);

impl IntoResponse for Twiml {
    fn into_response(self) -> Response {
        ([(header::CONTENT_TYPE, CONTENT_TYPE)], envelope(&self.0)).into_response()
    }
}
