use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Category hierarchy contains a cycle at {0}")]
    CyclicHierarchy(Uuid),

    #[error("Category hierarchy is deeper than the configured limit of {limit}")]
    DepthLimitExceeded { limit: usize },
}
