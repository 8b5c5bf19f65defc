//! # Application Error Types
//!
//! This module defines the error taxonomy shared by the store and service
//! layers. The parser and consolidator never produce errors; malformed input
//! there degrades by omission instead.

/// Errors surfaced by the store and service layers
#[derive(Debug, Clone)]
pub enum AppError {
    /// Backing store unavailable or missing configuration; a hard failure
    NotConfigured(String),
    /// A referenced document does not exist
    NotFound(String),
    /// Input rejected at the service boundary before reaching core logic
    Validation(String),
    /// Caller identity missing or not a member of the household
    Unauthenticated(String),
    /// Shopping list generation requested for a week with no assigned meals
    EmptyPlan,
    /// Underlying database failure
    Backend(String),
    /// Document could not be encoded or decoded
    Serialization(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::NotConfigured(msg) => write!(f, "Not configured: {msg}"),
            AppError::NotFound(msg) => write!(f, "Not found: {msg}"),
            AppError::Validation(msg) => write!(f, "Validation failed: {msg}"),
            AppError::Unauthenticated(msg) => write!(f, "Unauthenticated: {msg}"),
            AppError::EmptyPlan => write!(f, "No meals planned for this week"),
            AppError::Backend(msg) => write!(f, "Store error: {msg}"),
            AppError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Backend(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}
