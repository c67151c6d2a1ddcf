//! Validation errors
//!
//! Every variant renders as the message shown to the operator, so callers
//! can surface `err.to_string()` directly.

use thiserror::Error;

/// A client-side validation failure. Raised before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    // ==================== Client record ====================
    #[error("Default Due On and Max Due On are required fields")]
    DueOnRequired,

    #[error("Default Due On and Max Due On must be non-negative integers")]
    DueOnNotNonNegative,

    #[error("Max Due On must be greater than Default Due On")]
    MaxDueOnNotGreater,

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{0} accepts digits only")]
    NonNumericInput(&'static str),

    #[error("{0} cannot be edited")]
    ReadOnlyField(&'static str),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    // ==================== Password ====================
    #[error("Password must be at least 8 characters.")]
    PasswordTooShort,

    #[error("Password must contain a lowercase letter.")]
    PasswordMissingLowercase,

    #[error("Password must contain an uppercase letter.")]
    PasswordMissingUppercase,

    #[error("Password must contain a symbol.")]
    PasswordMissingSymbol,

    #[error("New password and confirm password do not match.")]
    PasswordMismatch,

    // ==================== App update ====================
    #[error("App update selection is required")]
    AppUpdateRequired,

    #[error("Download link is required when app update is enabled")]
    DownloadLinkRequired,

    #[error("App update must be one of: Yes, No")]
    InvalidAppUpdate(String),
}

/// Result type for validation steps
pub type ValidationResult<T> = Result<T, ValidationError>;
