//! Storage-agnostic access to teams, participants, programs and registrations.
//!
//! [`Registry`] is the single contract the registration workflow and the
//! HTTP layer depend on. Two backings implement it:
//!
//! - [`PgRegistry`]: PostgreSQL via the `*Repo` query structs.
//! - [`MemoryRegistry`]: keyed maps with sequential ids, used for local runs
//!   and tests.
//!
//! Both enforce the same unique constraints and report violations as
//! [`RegistryError::UniqueViolation`] carrying the constraint name.

use std::collections::HashSet;

use async_trait::async_trait;
use fest_core::types::DbId;

use crate::models::participant::{
    CreateParticipant, Participant, ParticipantWithTeam, UpdateParticipant,
};
use crate::models::program::{CreateProgram, Program, ProgramFilter};
use crate::models::registration::{
    CreateEnrollment, CreateRegistration, ProgramRegistrationCount, Registration,
    RegistrationFilter, RegistrationWithDetails,
};
use crate::models::team::{CreateTeam, Team};

pub mod memory;
pub mod postgres;

pub use memory::MemoryRegistry;
pub use postgres::PgRegistry;

// ---------------------------------------------------------------------------
// Constraint names
// ---------------------------------------------------------------------------

/// Team names are unique.
pub const UQ_TEAM_NAME: &str = "uq_teams_name";
/// Team code prefixes are unique.
pub const UQ_TEAM_CODE: &str = "uq_teams_code";
/// Issued participant codes are unique.
pub const UQ_PARTICIPANT_CODE: &str = "uq_participants_unique_code";
/// Participant names are unique ignoring case.
pub const UQ_PARTICIPANT_NAME: &str = "uq_participants_full_name_lower";
/// A participant holds at most one registration per program.
pub const UQ_REGISTRATION_PAIR: &str = "uq_registrations_participant_program";

/// PostgreSQL SQLSTATE for `unique_violation`.
const PG_UNIQUE_VIOLATION: &str = "23505";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Duplicate value violates unique constraint: {constraint}")]
    UniqueViolation { constraint: String },

    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl RegistryError {
    /// Whether this is a unique violation on the named constraint.
    pub fn is_unique_violation(&self, name: &str) -> bool {
        matches!(self, Self::UniqueViolation { constraint } if constraint == name)
    }
}

impl From<sqlx::Error> for RegistryError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some(PG_UNIQUE_VIOLATION) {
                let constraint = db_err.constraint().unwrap_or("unknown").to_string();
                return Self::UniqueViolation { constraint };
            }
        }
        Self::Database(err)
    }
}

pub type RegistryResult<T> = Result<T, RegistryError>;

// ---------------------------------------------------------------------------
// Contract
// ---------------------------------------------------------------------------

/// Storage contract for the four festival entities.
///
/// Lookups return `Ok(None)` for a missing row; only the `resolve_*` joins
/// report a missing row as [`RegistryError::NotFound`]. Nothing cascades.
#[async_trait]
pub trait Registry: Send + Sync {
    /// Confirm the backing store is reachable.
    async fn health_check(&self) -> RegistryResult<()>;

    // --- Teams ---

    async fn list_teams(&self) -> RegistryResult<Vec<Team>>;
    async fn find_team(&self, id: DbId) -> RegistryResult<Option<Team>>;
    async fn find_team_by_code(&self, code: &str) -> RegistryResult<Option<Team>>;
    async fn create_team(&self, input: &CreateTeam) -> RegistryResult<Team>;

    // --- Programs ---

    async fn list_programs(&self, filter: &ProgramFilter) -> RegistryResult<Vec<Program>>;
    async fn find_program(&self, id: DbId) -> RegistryResult<Option<Program>>;
    async fn create_program(&self, input: &CreateProgram) -> RegistryResult<Program>;

    // --- Participants ---

    async fn list_participants(&self) -> RegistryResult<Vec<Participant>>;
    async fn find_participant(&self, id: DbId) -> RegistryResult<Option<Participant>>;
    async fn find_participant_by_code(&self, code: &str) -> RegistryResult<Option<Participant>>;
    /// Case-insensitive name lookup.
    async fn find_participant_by_name(
        &self,
        full_name: &str,
    ) -> RegistryResult<Option<Participant>>;
    /// Snapshot of every issued participant code.
    async fn list_unique_codes(&self) -> RegistryResult<HashSet<String>>;
    async fn create_participant(&self, input: &CreateParticipant) -> RegistryResult<Participant>;
    async fn update_participant(
        &self,
        id: DbId,
        input: &UpdateParticipant,
    ) -> RegistryResult<Option<Participant>>;

    // --- Registrations ---

    async fn list_registrations(&self, participant_id: DbId) -> RegistryResult<Vec<Registration>>;
    async fn find_registration(&self, id: DbId) -> RegistryResult<Option<Registration>>;
    async fn create_registration(
        &self,
        input: &CreateRegistration,
    ) -> RegistryResult<Registration>;

    /// Apply a profile image and insert registrations as one unit.
    ///
    /// Pairs that already exist are skipped. Returns how many rows were
    /// inserted. On any error nothing is written. Fails with `NotFound` for
    /// an unknown participant. An unknown program fails the whole call.
    async fn enroll(&self, input: &CreateEnrollment) -> RegistryResult<usize>;

    /// Remove one registration. Returns `true` if a row was removed.
    async fn delete_registration(&self, id: DbId) -> RegistryResult<bool>;

    // --- Joined reads ---

    /// Join a participant to its team, failing with `NotFound` if either is missing.
    async fn resolve_participant_with_team(&self, id: DbId) -> RegistryResult<ParticipantWithTeam>;

    /// Join registrations to participant, team and program.
    ///
    /// Rows whose references cannot be resolved are dropped silently.
    async fn resolve_registrations_with_details(
        &self,
        filter: &RegistrationFilter,
    ) -> RegistryResult<Vec<RegistrationWithDetails>>;

    /// Registration count per program, counting only resolvable rows.
    async fn count_registrations_by_program(
        &self,
    ) -> RegistryResult<Vec<ProgramRegistrationCount>>;
}
