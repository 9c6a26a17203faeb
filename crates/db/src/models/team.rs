//! Team entity model and DTOs.

use fest_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A team row from the `teams` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Team {
    pub id: DbId,
    pub name: String,
    /// Short prefix used for participant codes, e.g. `QU`.
    pub code: String,
    pub created_at: Timestamp,
}

/// DTO for creating a team. Teams are seeded, never created over HTTP.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTeam {
    pub name: String,
    pub code: String,
}
