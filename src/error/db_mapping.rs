use super::app_error::AppError;

/// Maps PostgreSQL SQLSTATE codes a read-only catalog can hit.
pub(super) fn map_database_error(code: Option<&str>, message: &str) -> Option<AppError> {
    match code {
        Some("08000") | Some("08001") | Some("08003") | Some("08006") => Some(
            AppError::StoreUnavailable(format!("database connection failure: {message}")),
        ),
        Some("53300") => Some(AppError::StoreUnavailable(
            "database has too many connections".to_string(),
        )),
        Some("57014") => Some(AppError::StoreUnavailable(
            "category query was cancelled".to_string(),
        )),
        Some("57P01") | Some("57P02") | Some("57P03") => Some(AppError::StoreUnavailable(
            "database is shutting down or starting up".to_string(),
        )),
        _ => None,
    }
}
