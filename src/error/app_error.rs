use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Category store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Invalid category hierarchy: {0}")]
    InvalidHierarchy(String),

    #[error("Internal server error")]
    InternalError(#[source] anyhow::Error),

    #[error("Service unavailable: {service}")]
    ServiceUnavailable { service: String, message: String },
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let payload = serde_json::json!({
            "error": self.public_message(),
            "code": self.error_code(),
        });

        HttpResponse::build(self.status_code()).json(payload)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::DatabaseError(_)
            | AppError::StoreUnavailable(_)
            | AppError::InvalidHierarchy(_)
            | AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            AppError::InvalidHierarchy(_) => "INVALID_HIERARCHY",
            AppError::InternalError(_) => "INTERNAL_ERROR",
            AppError::ServiceUnavailable { .. } => "SERVICE_UNAVAILABLE",
        }
    }

    pub fn category_not_found() -> Self {
        Self::NotFound("category not found".to_string())
    }

    /// Message safe to hand to clients; store and internal details stay in logs.
    pub(crate) fn public_message(&self) -> String {
        match self {
            AppError::DatabaseError(_)
            | AppError::StoreUnavailable(_)
            | AppError::InvalidHierarchy(_)
            | AppError::InternalError(_) => "Internal server error".to_string(),
            AppError::NotFound(message) | AppError::BadRequest(message) => message.clone(),
            AppError::ServiceUnavailable { message, .. } => message.clone(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
