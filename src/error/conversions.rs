use crate::domain::DomainError;
use crate::error::app_error::AppError;
use crate::error::db_mapping::map_database_error;

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::CyclicHierarchy(_) | DomainError::DepthLimitExceeded { .. } => {
                AppError::InvalidHierarchy(err.to_string())
            }
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalError(err)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(io) => AppError::StoreUnavailable(format!("database i/o: {io}")),
            sqlx::Error::PoolTimedOut => {
                AppError::StoreUnavailable("database pool timed out".to_string())
            }
            sqlx::Error::PoolClosed => {
                AppError::StoreUnavailable("database pool is closed".to_string())
            }
            sqlx::Error::Database(database_error) => {
                if let Some(mapped) =
                    map_database_error(database_error.code().as_deref(), database_error.message())
                {
                    mapped
                } else {
                    AppError::DatabaseError(sqlx::Error::Database(database_error))
                }
            }
            other => AppError::DatabaseError(other),
        }
    }
}
