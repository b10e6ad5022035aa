//! # Error Handling for Query Translation
//!
//! Translation is almost entirely forgiving: unknown operator suffixes fall back
//! to literal keys, absent parameters are omitted and failed numeric coercions
//! flow through as NaN. The one fatal input is a `_like` filter whose value was
//! coerced to a number or boolean, since substring matching is undefined for
//! those types.
//!
//! `QueryError` maps onto HTTP status codes and renders a sanitized JSON body
//! when returned from an axum handler:
//!
//! ```rust,ignore
//! use querycrate::{FindQuery, QueryError, QueryOptions, find_all_query};
//!
//! async fn list_events(FindQuery(query): FindQuery) -> Result<Json<QueryOptions>, QueryError> {
//!     Ok(Json(find_all_query(&query, None)?))
//! }
//! ```
//!
//! Internal details are logged through `tracing` and never sent to clients.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// 400 Bad Request - `_like` used on a value that is not a string
    UnsupportedLikeValue {
        /// Field the filter targeted
        field: String,
        /// Type the value was coerced to ("number" or "boolean")
        kind: &'static str,
    },

    /// 500 Internal Server Error - modifier configuration could not be loaded
    InvalidModifiers {
        /// Parser error details (logged, not sent to user)
        message: String,
    },
}

impl QueryError {
    /// Create an error for a `_like` filter on a non-string value
    ///
    /// # Example
    /// ```rust,ignore
    /// return Err(QueryError::unsupported_like("fans", "number"));
    /// ```
    pub fn unsupported_like(field: impl Into<String>, kind: &'static str) -> Self {
        Self::UnsupportedLikeValue {
            field: field.into(),
            kind,
        }
    }

    /// Create an error for a modifier document that failed to parse
    pub fn invalid_modifiers(message: impl Into<String>) -> Self {
        Self::InvalidModifiers {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::UnsupportedLikeValue { .. } => StatusCode::BAD_REQUEST,
            Self::InvalidModifiers { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the user-facing error message (sanitized)
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::UnsupportedLikeValue { field, kind } => {
                format!("{kind} value doesn't support like operator (field '{field}')")
            }
            Self::InvalidModifiers { .. } => "Query configuration error".to_string(),
        }
    }

    fn log_internal(&self) {
        match self {
            Self::InvalidModifiers { message } => {
                tracing::error!(details = %message, "Invalid query modifier configuration");
            }
            Self::UnsupportedLikeValue { .. } => {
                tracing::debug!(
                    error = %self.user_message(),
                    status = %self.status_code(),
                    "Query translation error"
                );
            }
        }
    }
}

/// Error response sent to users (sanitized)
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        self.log_internal();
        let body = ErrorResponse {
            error: self.user_message(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidModifiers { message } => {
                write!(f, "invalid query modifiers: {message}")
            }
            Self::UnsupportedLikeValue { .. } => write!(f, "{}", self.user_message()),
        }
    }
}

impl std::error::Error for QueryError {}

impl From<serde_json::Error> for QueryError {
    fn from(err: serde_json::Error) -> Self {
        Self::invalid_modifiers(err.to_string())
    }
}
