/**
 * Backend Error Types
 *
 * This module defines the error taxonomy of the server. Every handler
 * returns `Result<_, BackendError>` and the error is turned into a JSON
 * envelope by `conversion.rs`.
 *
 * # Error Categories
 *
 * ## Client Errors
 *
 * - `Conflict` - registration collided with an existing name or mail
 * - `InvalidCredentials` - unknown name or wrong password (one payload for both)
 * - `NotFound` - no session cookie, or no active session behind it
 * - `HandlerError` - any other request-level failure with an explicit status
 *
 * ## Server Errors
 *
 * - `CryptoError` - password hashing or random generation failed
 * - `DatabaseError` - the persistence layer failed
 *
 * Server errors never expose their details to the client; the details are
 * logged at the point of conversion.
 */

use axum::http::StatusCode;
use thiserror::Error;

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use cookie_auth::backend::error::BackendError;
///
/// let err = BackendError::conflict("Name already taken");
/// assert_eq!(err.status_code().as_u16(), 409);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Request-level error with an explicit status
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Duplicate identity on registration
    #[error("Conflict: {message}")]
    Conflict {
        /// Human-readable error message
        message: String,
    },

    /// Unknown name or wrong password
    ///
    /// Deliberately carries no context, so both cases render identically.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Missing session or other absent resource
    #[error("Not found: {message}")]
    NotFound {
        /// Human-readable error message
        message: String,
    },

    /// Password hashing or RNG failure
    #[error("Crypto error: {message}")]
    CryptoError {
        /// Internal detail, logged only
        message: String,
    },

    /// Persistence layer failure
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Create a new conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a new crypto error
    pub fn crypto(message: impl Into<String>) -> Self {
        Self::CryptoError {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `Conflict` - 409 Conflict
    /// - `InvalidCredentials` - 404 Not Found
    /// - `NotFound` - 404 Not Found
    /// - `CryptoError` - 500 Internal Server Error
    /// - `DatabaseError` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::InvalidCredentials => StatusCode::NOT_FOUND,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::CryptoError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the message shown to the client
    ///
    /// Server errors are reduced to a generic message.
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::Conflict { message } => message.clone(),
            Self::InvalidCredentials => "Invalid credentials".to_string(),
            Self::NotFound { message } => message.clone(),
            Self::CryptoError { .. } | Self::DatabaseError(_) => {
                "Internal server error".to_string()
            }
        }
    }

    /// Whether this error is the server's fault
    pub fn is_internal(&self) -> bool {
        self.status_code().is_server_error()
    }
}
