//! Participant onboarding for the festival portal.
//!
//! [`RegistrationWorkflow`] turns a name and team into a participant with
//! a unique code, then lets the code holder sign up for programs. It talks
//! to storage only through [`fest_db::registry::Registry`], so the same
//! workflow runs over PostgreSQL or the in-memory registry.

pub mod error;
pub mod issue_lock;
pub mod workflow;

pub use error::{WorkflowError, WorkflowResult};
pub use workflow::{
    CodeLookup, IssuedCode, ProgramRegistration, RegistrationWorkflow,
    DEFAULT_MAX_CODE_ATTEMPTS,
};
