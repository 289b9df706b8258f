//! # Store Error Types
//!
//! Error types for row storage operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  reqwest::Error / serde_json::Error / missing row                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds context and categorization            │
//! │       │                                                                 │
//! │       ├──► RowTable: logged, local rows left untouched                 │
//! │       │                                                                 │
//! │       └──► CLI: anyhow context, printed to stderr                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Row storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Row not found.
    ///
    /// ## When This Occurs
    /// - Updating or deleting an id the repository does not hold
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// The server answered with a non-success status.
    ///
    /// ## When This Occurs
    /// - `PUT /api/{id}` or `DELETE /api/{id}` rejected (4xx/5xx)
    /// - `GET` of a list that the server refuses
    #[error("{method} {url} returned HTTP {status}")]
    Status {
        method: String,
        url: String,
        status: u16,
    },

    /// The request never produced a response.
    ///
    /// ## When This Occurs
    /// - Server unreachable, DNS failure, TLS failure
    /// - Timeout (see `StoreConfig::timeout`)
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A body could not be encoded or decoded.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Store configuration is unusable (e.g. empty base URL).
    #[error("Invalid store configuration: {0}")]
    Config(String),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    pub fn status(method: impl Into<String>, url: impl Into<String>, status: u16) -> Self {
        StoreError::Status {
            method: method.into(),
            url: url.into(),
            status,
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
