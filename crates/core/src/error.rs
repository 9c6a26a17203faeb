use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// A uniqueness violation surfaced from the store that could not be
    /// resolved (e.g. code issuance lost every retry).
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("A participant named '{0}' is already registered")]
    DuplicateName(String),

    #[error("Team with id {0} does not exist")]
    InvalidTeam(DbId),

    #[error("No participant holds the code '{0}'")]
    InvalidCode(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        CoreError::Validation(errors.to_string())
    }
}
