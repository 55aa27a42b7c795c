//! Error handling middleware - RFC 7807 compliant responses.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use blogforge_shared::ErrorResponse;
use std::fmt;

use blogforge_core::pipeline::PipelineError;
use blogforge_core::ports::SourceError;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Unauthorized,
    Conflict(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Unauthorized => write!(f, "Unauthorized"),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Unauthorized => ErrorResponse::unauthorized(),
            AppError::Conflict(detail) => ErrorResponse::new(409, "Conflict").with_detail(detail),
            AppError::Internal(detail) => {
                // Internal variants are constructed with already-generic
                // messages; upstream detail was logged where it happened.
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error(detail)
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

impl From<blogforge_core::error::RepoError> for AppError {
    fn from(err: blogforge_core::error::RepoError) -> Self {
        match err {
            blogforge_core::error::RepoError::NotFound => {
                AppError::NotFound("Resource not found".to_string())
            }
            blogforge_core::error::RepoError::Constraint(msg) => AppError::Conflict(msg),
            blogforge_core::error::RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            blogforge_core::error::RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

/// Pipeline failures: malformed requests and stage-level input rejections
/// are the caller's fault; any other stage failure is answered with a
/// generic message while the upstream detail is logged with stage context.
impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::InvalidRequest(msg) => AppError::BadRequest(msg),
            // A stage rejecting its input (e.g. the direct-only transcript
            // strategy handed a link) is still a caller problem.
            PipelineError::Stage {
                stage,
                source: SourceError::InvalidInput(msg),
            } => {
                tracing::debug!(%stage, %msg, "pipeline stage rejected input");
                AppError::BadRequest(msg)
            }
            PipelineError::Stage { stage, source } => {
                tracing::error!(%stage, error = %source, "pipeline stage failed");
                AppError::Internal(stage.failure_message().to_string())
            }
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
