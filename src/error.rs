// src/error.rs

use std::fmt;

/// Global Application Error Enum.
/// Centralizes error handling for the store and the workflows built on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    // Unexpected failure (e.g., password hashing)
    InternalServerError(String),

    // Input rejected before anything is dispatched
    BadRequest(String),

    // Sign-in failure
    AuthError(String),

    // Referenced entity does not exist
    NotFound(String),

    // Duplicate entity (e.g., duplicate email)
    Conflict(String),

    // Key-value backend failure (quota, I/O)
    Storage(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

/// Converts `serde_json::Error` into `AppError::BadRequest`.
/// Malformed JSON input is a caller problem, not an internal one.
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}
