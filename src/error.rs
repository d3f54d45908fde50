//! Domain-specific error types for agriloka

use thiserror::Error;

/// Main error type for the Agriloka AI service layer
#[derive(Error, Debug)]
pub enum AgrilokaError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Network error: {message}")]
    Network { message: String },

    /// Upstream answered with a non-success status
    #[error("HTTP {status} error: {message}")]
    Http { status: u16, message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Timeout error: {operation} timed out after {timeout_ms}ms")]
    Timeout { operation: String, timeout_ms: u64 },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl AgrilokaError {
    /// Whether a retry of the same call could plausibly succeed
    pub fn is_transient(&self) -> bool {
        match self {
            AgrilokaError::Network { .. } | AgrilokaError::Timeout { .. } => true,
            // Rate limiting and server faults clear up; client errors do not
            AgrilokaError::Http { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Human-readable message for end users of the platform
    pub fn user_message(&self) -> String {
        match self {
            AgrilokaError::Config { .. } => {
                "Layanan AI belum dikonfigurasi. Silakan periksa API key pada file .env.".to_string()
            }
            AgrilokaError::Network { .. }
            | AgrilokaError::Http { .. }
            | AgrilokaError::Timeout { .. } => {
                "Gagal terhubung ke layanan. Silakan coba lagi.".to_string()
            }
            AgrilokaError::Validation { message } => message.clone(),
            AgrilokaError::Serialization { .. } | AgrilokaError::Internal { .. } => {
                "Gagal menganalisis. Silakan coba lagi.".to_string()
            }
        }
    }
}

impl From<anyhow::Error> for AgrilokaError {
    fn from(err: anyhow::Error) -> Self {
        AgrilokaError::Internal {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for AgrilokaError {
    fn from(err: serde_json::Error) -> Self {
        AgrilokaError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for AgrilokaError {
    fn from(err: reqwest::Error) -> Self {
        AgrilokaError::Network {
            message: format!("HTTP request failed: {}", err),
        }
    }
}

impl From<std::io::Error> for AgrilokaError {
    fn from(err: std::io::Error) -> Self {
        AgrilokaError::Internal {
            message: format!("I/O error: {}", err),
        }
    }
}

/// Result type alias for Agriloka operations
pub type Result<T> = std::result::Result<T, AgrilokaError>;
