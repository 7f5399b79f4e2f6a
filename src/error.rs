//! Application Errors
//!
//! One error type for store edits, form parsing and config loading.

use serde::{Deserialize, Serialize};

/// Common result type for application operations
pub type FarmResult<T> = Result<T, FarmError>;

/// Application-level errors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FarmError {
    NotFound(String),
    InvalidInput(String),
    Config(String),
}

impl std::fmt::Display for FarmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FarmError::NotFound(msg) => write!(f, "Not found: {}", msg),
            FarmError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            FarmError::Config(msg) => write!(f, "Config error: {}", msg),
        }
    }
}

impl std::error::Error for FarmError {}

impl From<serde_json::Error> for FarmError {
    fn from(e: serde_json::Error) -> Self {
        FarmError::Config(e.to_string())
    }
}
