use fest_core::error::CoreError;
use fest_db::registry::RegistryError;

/// Errors returned by [`RegistrationWorkflow`](crate::RegistrationWorkflow).
///
/// Domain failures (bad input, unknown team or code, duplicate name,
/// exhausted code retries) are [`CoreError`]s; anything the store reports
/// that the workflow does not translate passes through as [`RegistryError`].
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

pub type WorkflowResult<T> = Result<T, WorkflowError>;
