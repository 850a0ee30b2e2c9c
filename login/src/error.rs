use intake_core::ErrorCategory;
use std::io;
use thiserror::Error;

/// Session store errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Sign-in, registration and biometric unlock errors
#[derive(Debug, Error)]
pub enum AuthError {
    /// Form input rejected before contacting the provider
    #[error("{0}")]
    InvalidInput(String),

    #[error("Network error: {0}")]
    Network(String),

    /// The provider answered with an error code
    #[error("{message}")]
    Rejected { code: String, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Biometric authentication is not available on this device")]
    BiometricUnavailable,

    #[error("Biometric login is not enabled")]
    BiometricDisabled,

    #[error("Biometric authentication failed or was cancelled")]
    BiometricRejected,

    #[error("No stored credentials found. Please login with password first.")]
    NoSavedCredentials,

    #[error("Session store error: {0}")]
    Storage(#[from] StorageError),
}

impl AuthError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Shared category used for exit codes and log fields
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput(_) => ErrorCategory::Validation,
            Self::Network(_) | Self::Parse(_) => ErrorCategory::Network,
            Self::Storage(_) => ErrorCategory::Storage,
            Self::Rejected { .. }
            | Self::BiometricUnavailable
            | Self::BiometricDisabled
            | Self::BiometricRejected
            | Self::NoSavedCredentials => ErrorCategory::Auth,
        }
    }
}
