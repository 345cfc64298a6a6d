use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// Clock data that cannot be classified (inverted ranges, implausible
    /// durations). Maps to an unprocessable-entity response at the boundary.
    #[error("Inconsistent clock data: {0}")]
    Consistency(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
