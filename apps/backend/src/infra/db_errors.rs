//! SeaORM -> DomainError translation helpers.
//!
//! Adapters convert `sea_orm::DbErr` into `crate::errors::domain::DomainError`
//! here, and higher layers then map `DomainError` to `AppError` via `From`.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::logging::pii::Redacted;
use crate::web::trace_ctx;

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Translate a `DbErr` into a `DomainError` with sanitized, PII-safe detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        sea_orm::DbErr::RecordNotFound(_) => {
            return DomainError::not_found(NotFoundKind::Other("Record".into()), "Record not found");
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unique constraint violation");

        // The only unique constraint in this schema besides primary keys is
        // the email index; match both the Postgres index name and the
        // SQLite-style table.column form.
        if error_msg.contains("ux_users_email") || error_msg.contains("users.email") {
            return DomainError::conflict(ConflictKind::UniqueEmail, "Email already exists");
        }

        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        );
    }

    if error_msg.contains("timeout")
        || error_msg.contains("pool")
        || error_msg.contains("unavailable")
    {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database timeout or pool issue");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}
