//! Error types and handling.

use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Durable storage read/write failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Course endpoint returned a bad response
    #[error("Course fetch failed: {0}")]
    CourseFetch(String),
}

/// Result type alias for AppError
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Create a storage error with message
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a course fetch error with message
    pub fn course_fetch(msg: impl Into<String>) -> Self {
        Self::CourseFetch(msg.into())
    }
}
