//! Typed error enum for the storage layer.
//!
//! Callers match on specific failure modes (not found, duplicate, rejected
//! query) and relay the backend's own message when surfacing them.

use fauna_core::UNIQUE_VIOLATION_CODE;
use thiserror::Error;

/// PostgREST code for a single-object request that matched no row.
pub(crate) const SINGLE_ROW_MISSING_CODE: &str = "PGRST116";

/// Storage-layer error with variants covering every expected failure mode.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Row not found for expected-present entity.
    #[error("not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    /// Unique constraint violation (`wikipedia_title` collision).
    #[error("duplicate: {0}")]
    Duplicate(String),

    /// The store refused the query (constraint, type, syntax).
    #[error("store rejected query ({status}): {message}")]
    Rejected { status: u16, code: Option<String>, message: String },

    /// Store location could not be turned into a request URL.
    #[error("invalid store url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Could not reach the store or read its answer.
    #[error("store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Store answered with a body we could not decode.
    #[error("unexpected store response in {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// SQL / connection / timeout failure.
    #[cfg(feature = "postgres")]
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl StorageError {
    /// Whether this error is a unique-constraint violation.
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate(_))
    }

    /// Whether the requested row is absent, as reported by either backend.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Rejected { code, .. } => code.as_deref() == Some(SINGLE_ROW_MISSING_CODE),
            _ => false,
        }
    }

    /// Message suitable for relaying to an API caller unchanged.
    ///
    /// For rejections this is the backend's own text, without our prefix.
    #[must_use]
    pub fn backend_message(&self) -> String {
        match self {
            Self::Duplicate(msg) | Self::Rejected { message: msg, .. } => msg.clone(),
            #[cfg(feature = "postgres")]
            Self::Database(sqlx::Error::Database(db_err)) => db_err.message().to_owned(),
            other => other.to_string(),
        }
    }

    /// Classifies a backend rejection by its SQLSTATE-style code.
    #[must_use]
    pub fn rejected(status: u16, code: Option<String>, message: String) -> Self {
        if code.as_deref() == Some(UNIQUE_VIOLATION_CODE) {
            Self::Duplicate(message)
        } else {
            Self::Rejected { status, code, message }
        }
    }
}

/// `RowNotFound` → `NotFound`, SQLSTATE 23505 → `Duplicate`, everything else
/// → `Database`.
#[cfg(feature = "postgres")]
impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound { entity: "row", id: "unknown".into() },
            sqlx::Error::Database(db_err)
                if db_err.code().is_some_and(|c| c == UNIQUE_VIOLATION_CODE) =>
            {
                Self::Duplicate(db_err.message().to_owned())
            },
            _ => Self::Database(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_violation_code_maps_to_duplicate() {
        let err = StorageError::rejected(
            409,
            Some("23505".to_owned()),
            "duplicate key value violates unique constraint".to_owned(),
        );
        assert!(err.is_duplicate());
        assert_eq!(err.backend_message(), "duplicate key value violates unique constraint");
    }

    #[test]
    fn other_codes_stay_rejected() {
        let err = StorageError::rejected(
            400,
            Some("23502".to_owned()),
            "null value in column \"name\"".to_owned(),
        );
        assert!(!err.is_duplicate());
        assert!(matches!(err, StorageError::Rejected { status: 400, .. }));
        assert_eq!(err.backend_message(), "null value in column \"name\"");
    }

    #[test]
    fn not_found_message_names_entity() {
        let err = StorageError::NotFound { entity: "animal", id: "42".to_owned() };
        assert!(err.is_not_found());
        assert_eq!(err.backend_message(), "not found: animal with id 42");
    }

    #[test]
    fn single_row_miss_keeps_backend_message() {
        let err = StorageError::rejected(
            406,
            Some("PGRST116".to_owned()),
            "Cannot coerce the result to a single JSON object".to_owned(),
        );
        assert!(err.is_not_found());
        assert_eq!(err.backend_message(), "Cannot coerce the result to a single JSON object");
    }
}
