use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use fest_core::error::CoreError;
use fest_db::registry::RegistryError;
use fest_registration::WorkflowError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`RegistryError`] for storage
/// errors, and adds HTTP-specific variants. Implements [`IntoResponse`] to
/// produce `{"error", "code"}` JSON bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `fest_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A storage error from the registry.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<WorkflowError> for AppError {
    fn from(err: WorkflowError) -> Self {
        match err {
            WorkflowError::Core(e) => Self::Core(e),
            WorkflowError::Registry(e) => Self::Registry(e),
        }
    }
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::InvalidTeam(_) => {
                    (StatusCode::BAD_REQUEST, "INVALID_TEAM", core.to_string())
                }
                CoreError::InvalidCode(_) => {
                    (StatusCode::NOT_FOUND, "INVALID_CODE", core.to_string())
                }
                CoreError::DuplicateName(_) => {
                    (StatusCode::CONFLICT, "DUPLICATE_NAME", core.to_string())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal()
                }
            },

            // --- Registry errors ---
            AppError::Registry(err) => classify_registry_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

/// Classify a registry error into an HTTP status, error code, and message.
///
/// - `NotFound` maps to 404.
/// - Unique violations on a named `uq_` constraint map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_registry_error(err: &RegistryError) -> (StatusCode, &'static str, String) {
    match err {
        RegistryError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        RegistryError::UniqueViolation { constraint } if constraint.starts_with("uq_") => (
            StatusCode::CONFLICT,
            "CONFLICT",
            format!("Duplicate value violates unique constraint: {constraint}"),
        ),
        other => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}
