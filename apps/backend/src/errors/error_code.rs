//! Error codes for the StudentHub backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the `code` field of the
//! error envelope.

use core::fmt;

/// Centralized error codes for the StudentHub backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication
    /// No credential header on a protected path
    MissingCredential,
    /// Credential failed signature/encoding checks or has expired
    InvalidOrExpiredCredential,
    /// Password did not match the stored hash
    InvalidPassword,

    // Request Validation
    /// Request body could not be parsed
    InvalidBody,
    /// Invalid email address
    InvalidEmail,
    /// General validation error
    ValidationError,
    /// Account already registered for this email
    UserExists,

    // Resource Not Found
    /// User not found
    UserNotFound,
    /// Post not found
    PostNotFound,

    // System Errors
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MissingCredential => "MISSING_CREDENTIAL",
            Self::InvalidOrExpiredCredential => "INVALID_OR_EXPIRED_CREDENTIAL",
            Self::InvalidPassword => "INVALID_PASSWORD",

            Self::InvalidBody => "INVALID_BODY",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::UserExists => "USER_EXISTS",

            Self::UserNotFound => "USER_NOT_FOUND",
            Self::PostNotFound => "POST_NOT_FOUND",

            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
