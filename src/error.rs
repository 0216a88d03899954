//! Error handling for the profile provisioner

use std::fmt;
use thiserror::Error;

/// Unified error type for the profile provisioner
#[derive(Error, Debug)]
pub enum Error {
    /// Network or HTTP related errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Delivery signature token errors
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// Document store rejected or failed a request
    #[error("Store error (status {status}): {message}")]
    Store { status: u16, message: String },

    /// Inbound event payload errors
    #[error("Event error: {0}")]
    Event(String),

    /// Delivery signature verification errors
    #[error("Signature error: {0}")]
    Signature(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new store error from a response status and body
    pub fn store<T: fmt::Display>(status: u16, message: T) -> Self {
        Error::Store {
            status,
            message: message.to_string(),
        }
    }

    /// Create a new event error
    pub fn event<T: fmt::Display>(msg: T) -> Self {
        Error::Event(msg.to_string())
    }

    /// Create a new signature error
    pub fn signature<T: fmt::Display>(msg: T) -> Self {
        Error::Signature(msg.to_string())
    }

    /// Create a new configuration error
    pub fn config<T: fmt::Display>(msg: T) -> Self {
        Error::Config(msg.to_string())
    }
}
