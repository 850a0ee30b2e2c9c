//! Error types for restaurant intake
//!
//! Local validation failures never reach the network layer; everything the
//! gateway reports is folded into `IntakeError::Network` so callers can show a
//! single generic failure while keeping the form state intact.

use std::fmt;

use thiserror::Error;

/// Error category for structured logging and exit-code mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// `intake.toml` or env misconfigured
    Config,
    /// A required field is empty or a format check failed
    Validation,
    /// Gateway call rejected, timed out, or returned a non-2xx status
    Network,
    /// Local session store could not be read or written
    Storage,
    /// Authentication provider or biometric gate refused
    Auth,
    /// Unexpected logic bugs
    Internal,
}

impl ErrorCategory {
    /// Machine-readable code for logging
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Config => "CONFIG_ERROR",
            Self::Validation => "VALIDATION_ERROR",
            Self::Network => "NETWORK_ERROR",
            Self::Storage => "STORAGE_ERROR",
            Self::Auth => "AUTH_ERROR",
            Self::Internal => "INTERNAL_ERROR",
        }
    }

    /// Whether the user can fix this by editing input and trying again
    pub fn user_recoverable(self) -> bool {
        matches!(self, Self::Validation | Self::Network | Self::Auth)
    }
}

/// Form fields that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormField {
    RestaurantName,
    StreetAddress,
    City,
    State,
    Zipcode,
    PrimaryPhone,
    WebsiteUrl,
    MenuUrl,
    GmPhone,
    SecondaryPhone,
    ThirdPhone,
    DoordashUrl,
    UberEatsUrl,
    GrubhubUrl,
}

impl FormField {
    /// Label shown next to the input
    pub fn label(self) -> &'static str {
        match self {
            Self::RestaurantName => "Restaurant Name",
            Self::StreetAddress => "Street Address",
            Self::City => "City",
            Self::State => "State",
            Self::Zipcode => "Zipcode",
            Self::PrimaryPhone => "Primary Phone",
            Self::WebsiteUrl => "Website URL",
            Self::MenuUrl => "Menu URL",
            Self::GmPhone => "GM Phone",
            Self::SecondaryPhone => "Secondary Phone",
            Self::ThirdPhone => "Third Phone",
            Self::DoordashUrl => "DoorDash URL",
            Self::UberEatsUrl => "Uber Eats URL",
            Self::GrubhubUrl => "Grubhub URL",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What went wrong with a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    Missing,
    InvalidZipcode,
    InvalidPhone,
    InvalidUrl,
}

/// One failing field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: FormField,
    pub kind: IssueKind,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            IssueKind::Missing => write!(f, "{} is required", self.field),
            IssueKind::InvalidZipcode => {
                write!(f, "{} must look like 12345 or 12345-6789", self.field)
            }
            IssueKind::InvalidPhone => write!(f, "{} is not a valid US phone number", self.field),
            IssueKind::InvalidUrl => write!(f, "{} is not a valid URL", self.field),
        }
    }
}

/// All issues found in one validation pass, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    issues: Vec<FieldIssue>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: FormField, kind: IssueKind) {
        self.issues.push(FieldIssue { field, kind });
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    /// Fields reported as missing
    pub fn missing(&self) -> Vec<FormField> {
        self.issues
            .iter()
            .filter(|i| i.kind == IssueKind::Missing)
            .map(|i| i.field)
            .collect()
    }

    pub fn has(&self, field: FormField) -> bool {
        self.issues.iter().any(|i| i.field == field)
    }

    /// `Ok(())` when nothing was recorded
    pub fn into_result(self) -> std::result::Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self.issues.iter().map(ToString::to_string).collect();
        f.write_str(&lines.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Intake error with category and context
#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("config error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("network error: {message}")]
    Network {
        message: String,
        /// HTTP status when the server answered
        status: Option<u16>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("storage error: {message}")]
    Storage {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("auth error: {message}")]
    Auth { message: String },

    #[error("internal error: {message}")]
    Internal { message: String },
}

impl IntakeError {
    /// Get the error category
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Config { .. } => ErrorCategory::Config,
            Self::Validation(_) => ErrorCategory::Validation,
            Self::Network { .. } => ErrorCategory::Network,
            Self::Storage { .. } => ErrorCategory::Storage,
            Self::Auth { .. } => ErrorCategory::Auth,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a config error with source
    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a network error without a status (transport, decode)
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
            status: None,
            source: None,
        }
    }

    /// Create a network error with source
    pub fn network_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Network {
            message: message.into(),
            status: None,
            source: Some(Box::new(source)),
        }
    }

    /// Create a network error for a non-2xx response
    pub fn http_status(status: u16, message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
            status: Some(status),
            source: None,
        }
    }

    /// Create a storage error with source
    pub fn storage_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Storage {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// HTTP status if the server answered with one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Network { status, .. } => *status,
            _ => None,
        }
    }

    /// Short message suitable for a notification banner
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(errors) => errors.to_string(),
            Self::Network { .. } => {
                "Could not reach the restaurant service. Please try again.".to_string()
            }
            Self::Auth { message } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl Clone for IntakeError {
    fn clone(&self) -> Self {
        match self {
            Self::Config { message, .. } => Self::Config {
                message: message.clone(),
                source: None,
            },
            Self::Validation(errors) => Self::Validation(errors.clone()),
            Self::Network {
                message, status, ..
            } => Self::Network {
                message: message.clone(),
                status: *status,
                source: None,
            },
            Self::Storage { message, .. } => Self::Storage {
                message: message.clone(),
                source: None,
            },
            Self::Auth { message } => Self::Auth {
                message: message.clone(),
            },
            Self::Internal { message } => Self::Internal {
                message: message.clone(),
            },
        }
    }
}

/// Result type for intake operations
pub type Result<T> = std::result::Result<T, IntakeError>;
