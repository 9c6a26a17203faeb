//! Participant entity model and DTOs.

use fest_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::team::Team;

/// A participant row from the `participants` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Participant {
    pub id: DbId,
    pub full_name: String,
    pub team_id: DbId,
    /// Issued once at registration, e.g. `QU001`. Never reassigned.
    pub unique_code: String,
    pub profile_image: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a participant.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateParticipant {
    pub full_name: String,
    pub team_id: DbId,
    pub unique_code: String,
}

/// DTO for updating a participant. Only the profile image is mutable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateParticipant {
    pub profile_image: Option<String>,
}

/// A participant joined with its team.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticipantWithTeam {
    #[serde(flatten)]
    pub participant: Participant,
    pub team: Team,
}
