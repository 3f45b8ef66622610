//! Typed error enum for the encyclopedia client.

use thiserror::Error;

/// Errors from encyclopedia API calls.
#[derive(Debug, Error)]
pub enum WikiError {
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),
    #[error("HTTP status {code}: {body}")]
    HttpStatus { code: u16, body: String },
    #[error("JSON parse error in {context}: {source}")]
    JsonParse {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid encyclopedia url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}
