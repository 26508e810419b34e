use tracing::error;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::request_logging::RequestSummary;

/// Records an unexpected 5xx and returns the id of the tracked event.
pub fn capture_server_error(request: &RequestSummary, status: u16) -> AppResult<Uuid> {
    if status < 500 {
        return Err(AppError::BadRequest(
            "capture_server_error requires an HTTP 5xx status".to_string(),
        ));
    }

    let event_id = Uuid::new_v4();
    error!(
        tracking_backend = "log",
        event_id = %event_id,
        request_id = %request.request_id,
        method = %request.method,
        path = %request.path,
        status = status,
        "unexpected server error captured"
    );
    Ok(event_id)
}
