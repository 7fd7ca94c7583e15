use std::collections::BTreeMap;

use actix_web::error::ResponseError;
use actix_web::http::{header, StatusCode};
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError};
use crate::web::trace_ctx;

/// Error body returned to clients.
///
/// Non-validation failures carry `message`; validation failures carry a
/// per-field `errors` map instead.
#[derive(Serialize)]
pub struct ErrorBody {
    pub timestamp: String,
    pub status: u16,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, String>>,
    pub path: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation failed")]
    Validation { errors: BTreeMap<String, String> },
    #[error("Bad request: {detail}")]
    BadRequest { detail: String },
    #[error("Email already exists")]
    DuplicateEmail,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Authentication required")]
    Unauthorized,
    #[error("Not found: {detail}")]
    NotFound { detail: String },
    #[error("Conflict: {detail}")]
    Conflict { detail: String },
    #[error("Storage failure: {detail}")]
    Storage { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::DuplicateEmail => StatusCode::CONFLICT,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message shown to clients. Server-side failures collapse into a
    /// generic message; their detail goes to the log only.
    fn client_message(&self) -> Option<String> {
        match self {
            AppError::Validation { .. } => None,
            AppError::BadRequest { detail } => Some(detail.clone()),
            AppError::DuplicateEmail => Some("Email already exists".to_string()),
            AppError::InvalidCredentials => Some("Invalid email or password".to_string()),
            AppError::Unauthorized => Some("Authentication required".to_string()),
            AppError::NotFound { detail } => Some(detail.clone()),
            AppError::Conflict { detail } => Some(detail.clone()),
            AppError::Storage { .. } | AppError::Config { .. } | AppError::Internal { .. } => {
                Some("An unexpected error occurred".to_string())
            }
        }
    }

    pub fn validation(errors: BTreeMap<String, String>) -> Self {
        Self::Validation { errors }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::BadRequest {
            detail: detail.into(),
        }
    }

    pub fn duplicate_email() -> Self {
        Self::DuplicateEmail
    }

    pub fn invalid_credentials() -> Self {
        Self::InvalidCredentials
    }

    pub fn unauthorized() -> Self {
        Self::Unauthorized
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::NotFound {
            detail: detail.into(),
        }
    }

    pub fn conflict(detail: impl Into<String>) -> Self {
        Self::Conflict {
            detail: detail.into(),
        }
    }

    pub fn storage(detail: impl Into<String>) -> Self {
        Self::Storage {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(detail) => AppError::bad_request(detail),
            DomainError::Conflict(ConflictKind::UniqueEmail, _) => AppError::duplicate_email(),
            DomainError::Conflict(_, detail) => AppError::conflict(detail),
            DomainError::NotFound(_, detail) => AppError::not_found(detail),
            DomainError::Infra(_, detail) => AppError::storage(detail),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let trace_id = trace_ctx::trace_id();
        let path = trace_ctx::path();

        if status.is_server_error() {
            // Log the detail server-side; the client sees a generic message.
            error!(trace_id = %trace_id, path = %path, detail = %self, "request failed");
        } else {
            warn!(trace_id = %trace_id, path = %path, status = %status.as_u16(), detail = %self, "request rejected");
        }

        let body = ErrorBody {
            timestamp: OffsetDateTime::now_utc()
                .format(&Rfc3339)
                .unwrap_or_else(|_| "unknown".to_string()),
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Unknown").to_string(),
            message: self.client_message(),
            errors: match self {
                AppError::Validation { errors } => Some(errors.clone()),
                _ => None,
            },
            path,
        };

        HttpResponse::build(status)
            .insert_header((
                header::HeaderName::from_static("x-request-id"),
                header::HeaderValue::from_str(&trace_id)
                    .unwrap_or_else(|_| header::HeaderValue::from_static("unknown")),
            ))
            .json(body)
    }
}
