use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid transition from '{from}' to '{requested}'")]
    InvalidTransition {
        from: &'static str,
        requested: &'static str,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}
