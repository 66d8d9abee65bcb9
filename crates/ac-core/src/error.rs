use thiserror::Error;

use crate::text::truncate_chars;

/// Maximum number of characters of an error surfaced inside a reply.
pub const INLINE_ERROR_LIMIT: usize = 180;

#[derive(Error, Debug)]
pub enum AcError {
    #[error("Missing configuration: {0}")]
    MissingConfig(String),
    #[error("Invalid configuration {key}: {message}")]
    InvalidConfig { key: String, message: String },
    #[error("RPC {function} {status}: {body}")]
    Rpc { function: String, status: u16, body: String },
    #[error("RPC {function} timed out after {millis}ms")]
    Timeout { function: String, millis: u64 },
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Session store error: {0}")]
    SessionStore(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AcError {
    pub fn invalid_config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig { key: key.into(), message: message.into() }
    }

    /// `Error: <message>` cut down to fit inside a chat reply.
    pub fn inline(&self) -> String {
        truncate_chars(&format!("Error: {self}"), INLINE_ERROR_LIMIT)
    }
}

pub type Result<T> = std::result::Result<T, AcError>;
