use actix_web::error::ResponseError;
use actix_web::http::{header, StatusCode};
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;

use crate::auth::CredentialError;
use crate::errors::ErrorCode;
use crate::trace_ctx;

/// Error envelope returned by every failing endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: &'static str,
    pub message: String,
    pub code: &'static str,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authorization header is required")]
    MissingCredential,
    #[error("Invalid or expired token")]
    InvalidOrExpiredCredential,
    #[error("Unauthorized: {detail}")]
    Unauthorized { code: ErrorCode, detail: String },
    #[error("Bad request: {detail}")]
    BadRequest { code: ErrorCode, detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::MissingCredential => ErrorCode::MissingCredential,
            AppError::InvalidOrExpiredCredential => ErrorCode::InvalidOrExpiredCredential,
            AppError::Unauthorized { code, .. } => *code,
            AppError::BadRequest { code, .. } => *code,
            AppError::NotFound { code, .. } => *code,
            AppError::Internal { .. } => ErrorCode::Internal,
            AppError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    /// Client-facing message. Internal details never leave the process.
    pub fn message(&self) -> String {
        match self {
            AppError::MissingCredential => "Authorization header is required".to_string(),
            AppError::InvalidOrExpiredCredential => "Invalid or expired token".to_string(),
            AppError::Unauthorized { detail, .. } => detail.clone(),
            AppError::BadRequest { detail, .. } => detail.clone(),
            AppError::NotFound { detail, .. } => detail.clone(),
            AppError::Internal { .. } => "Internal server error".to_string(),
            AppError::Config { .. } => "Server misconfigured".to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingCredential => StatusCode::UNAUTHORIZED,
            AppError::InvalidOrExpiredCredential => StatusCode::UNAUTHORIZED,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn missing_credential() -> Self {
        Self::MissingCredential
    }

    pub fn invalid_or_expired_credential() -> Self {
        Self::InvalidOrExpiredCredential
    }

    pub fn unauthorized(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Unauthorized {
            code,
            detail: detail.into(),
        }
    }

    pub fn bad_request(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            detail: detail.into(),
        }
    }

    pub fn not_found(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }
}

impl From<CredentialError> for AppError {
    fn from(_: CredentialError) -> Self {
        AppError::InvalidOrExpiredCredential
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, code = %self.code(), "request failed");
        }

        let body = ErrorBody {
            status: "error",
            message: self.message(),
            code: self.code().as_str(),
        };

        let mut builder = HttpResponse::build(status);
        builder.insert_header((trace_ctx::TRACE_ID_HEADER, trace_ctx::trace_id()));
        if status == StatusCode::UNAUTHORIZED {
            // RFC 7235: 401 must name the expected scheme
            builder.insert_header((header::WWW_AUTHENTICATE, "Bearer"));
        }
        builder.json(body)
    }
}
