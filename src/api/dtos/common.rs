use serde::Serialize;
use utoipa::ToSchema;

/// Body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Client-facing message, e.g. "category not found".
    pub error: String,
    /// Stable machine-readable code, e.g. "NOT_FOUND".
    pub code: String,
}
