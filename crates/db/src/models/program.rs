//! Program entity model and DTOs.

use fest_core::program::{ParticipationType, ProgramType};
use fest_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A program row from the `programs` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Program {
    pub id: DbId,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub program_type: ProgramType,
    #[sqlx(try_from = "String")]
    pub participation_type: ParticipationType,
    pub description: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for creating a program. Programs are seeded, never created over HTTP.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProgram {
    pub name: String,
    pub program_type: ProgramType,
    pub participation_type: ParticipationType,
    pub description: Option<String>,
}

/// Optional filters for listing programs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProgramFilter {
    pub program_type: Option<ProgramType>,
    pub participation_type: Option<ParticipationType>,
}

impl ProgramFilter {
    /// Whether `program` passes every filter that is set.
    pub fn matches(&self, program: &Program) -> bool {
        self.program_type.map_or(true, |t| t == program.program_type)
            && self
                .participation_type
                .map_or(true, |t| t == program.participation_type)
    }
}
