//! Registration entity model, DTOs and joined read models.

use fest_core::program::{ParticipationType, ProgramType};
use fest_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::participant::{Participant, ParticipantWithTeam};
use crate::models::program::Program;
use crate::models::team::Team;

/// A registration row from the `registrations` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Registration {
    pub id: DbId,
    pub participant_id: DbId,
    pub program_id: DbId,
    /// Set on insert and never updated.
    pub registered_at: Timestamp,
}

/// DTO for creating a registration.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRegistration {
    pub participant_id: DbId,
    pub program_id: DbId,
}

/// One enrollment step: an optional profile image plus the programs to add.
///
/// Applied as a unit by [`Registry::enroll`](crate::registry::Registry::enroll).
#[derive(Debug, Clone, Default)]
pub struct CreateEnrollment {
    pub participant_id: DbId,
    pub profile_image: Option<String>,
    pub program_ids: Vec<DbId>,
}

/// A registration joined with its participant (and team) and program.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegistrationWithDetails {
    pub id: DbId,
    pub registered_at: Timestamp,
    pub participant: ParticipantWithTeam,
    pub program: Program,
}

/// Optional filters for listing registrations with details.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct RegistrationFilter {
    pub participant_id: Option<DbId>,
    pub program_id: Option<DbId>,
}

/// Registration count for a single program.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct ProgramRegistrationCount {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub program: Program,
    pub registration_count: i64,
}

/// Flat row produced by the four-way join in
/// [`RegistrationRepo::list_with_details`](crate::repositories::RegistrationRepo::list_with_details).
#[derive(Debug, Clone, FromRow)]
pub struct RegistrationDetailRow {
    pub id: DbId,
    pub registered_at: Timestamp,

    pub participant_id: DbId,
    pub participant_full_name: String,
    pub participant_unique_code: String,
    pub participant_profile_image: Option<String>,
    pub participant_created_at: Timestamp,
    pub participant_updated_at: Timestamp,

    pub team_id: DbId,
    pub team_name: String,
    pub team_code: String,
    pub team_created_at: Timestamp,

    pub program_id: DbId,
    pub program_name: String,
    #[sqlx(try_from = "String")]
    pub program_type: ProgramType,
    #[sqlx(try_from = "String")]
    pub participation_type: ParticipationType,
    pub program_description: Option<String>,
    pub program_created_at: Timestamp,
}

impl From<RegistrationDetailRow> for RegistrationWithDetails {
    fn from(row: RegistrationDetailRow) -> Self {
        Self {
            id: row.id,
            registered_at: row.registered_at,
            participant: ParticipantWithTeam {
                participant: Participant {
                    id: row.participant_id,
                    full_name: row.participant_full_name,
                    team_id: row.team_id,
                    unique_code: row.participant_unique_code,
                    profile_image: row.participant_profile_image,
                    created_at: row.participant_created_at,
                    updated_at: row.participant_updated_at,
                },
                team: Team {
                    id: row.team_id,
                    name: row.team_name,
                    code: row.team_code,
                    created_at: row.team_created_at,
                },
            },
            program: Program {
                id: row.program_id,
                name: row.program_name,
                program_type: row.program_type,
                participation_type: row.participation_type,
                description: row.program_description,
                created_at: row.program_created_at,
            },
        }
    }
}
