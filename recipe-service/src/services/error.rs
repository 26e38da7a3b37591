use service_core::error::AppError;
use thiserror::Error;

use super::providers::ProviderError;

/// Failures reported by a [`RecipeStore`](super::RecipeStore).
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Map a sqlx error, lifting unique violations into their own variant.
    pub fn from_sqlx(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return StoreError::UniqueViolation(
                    db_err.constraint().unwrap_or("unique").to_string(),
                );
            }
        }
        StoreError::Database(err)
    }
}

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upstream error: {0}")]
    Upstream(#[from] ProviderError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::DuplicateEmail => {
                AppError::BadRequest(anyhow::anyhow!("Email already registered"))
            }
            ServiceError::InvalidCredentials => {
                AppError::BadRequest(anyhow::anyhow!("Incorrect email or password"))
            }
            ServiceError::Unauthorized => {
                AppError::Unauthorized(anyhow::anyhow!("Could not validate credentials"))
            }
            ServiceError::NotFound(what) => AppError::NotFound(anyhow::anyhow!("{} not found", what)),
            ServiceError::Validation(msg) => AppError::BadRequest(anyhow::anyhow!(msg)),
            ServiceError::Upstream(e) => {
                tracing::error!(error = %e, "Upstream AI provider failed");
                AppError::ServiceUnavailable("AI service unavailable".to_string())
            }
            ServiceError::Store(StoreError::UniqueViolation(constraint)) => {
                AppError::Conflict(anyhow::anyhow!("Duplicate value for {}", constraint))
            }
            ServiceError::Store(StoreError::Database(e)) => AppError::DatabaseError(e.into()),
            ServiceError::Internal(e) => AppError::InternalError(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn credential_errors_are_bad_requests() {
        let dup: AppError = ServiceError::DuplicateEmail.into();
        let creds: AppError = ServiceError::InvalidCredentials.into();
        assert_eq!(dup.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(creds.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn upstream_failure_is_service_unavailable() {
        let err: AppError = ServiceError::Upstream(ProviderError::NotConfigured).into();
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn not_found_names_the_entity() {
        let err: AppError = ServiceError::NotFound("Recipe").into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Not found: Recipe not found");
    }
}
