//! Repository for the `participants` table.

use fest_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::participant::{
    CreateParticipant, Participant, ParticipantWithTeam, UpdateParticipant,
};
use crate::models::team::Team;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, full_name, team_id, unique_code, profile_image, created_at, updated_at";

/// Flat row for the participant-team join.
#[derive(sqlx::FromRow)]
struct ParticipantTeamRow {
    id: DbId,
    full_name: String,
    team_id: DbId,
    unique_code: String,
    profile_image: Option<String>,
    created_at: Timestamp,
    updated_at: Timestamp,
    team_name: String,
    team_code: String,
    team_created_at: Timestamp,
}

impl From<ParticipantTeamRow> for ParticipantWithTeam {
    fn from(row: ParticipantTeamRow) -> Self {
        Self {
            participant: Participant {
                id: row.id,
                full_name: row.full_name,
                team_id: row.team_id,
                unique_code: row.unique_code,
                profile_image: row.profile_image,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            team: Team {
                id: row.team_id,
                name: row.team_name,
                code: row.team_code,
                created_at: row.team_created_at,
            },
        }
    }
}

/// Provides CRUD operations for participants.
pub struct ParticipantRepo;

impl ParticipantRepo {
    /// Insert a new participant, returning the created row.
    ///
    /// Fails with a unique violation on `uq_participants_unique_code` if the
    /// code was taken concurrently, or on `uq_participants_full_name_lower`
    /// for a case-insensitive name clash.
    pub async fn create(
        pool: &PgPool,
        input: &CreateParticipant,
    ) -> Result<Participant, sqlx::Error> {
        let query = format!(
            "INSERT INTO participants (full_name, team_id, unique_code)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Participant>(&query)
            .bind(&input.full_name)
            .bind(input.team_id)
            .bind(&input.unique_code)
            .fetch_one(pool)
            .await
    }

    /// Find a participant by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Participant>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM participants WHERE id = $1");
        sqlx::query_as::<_, Participant>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a participant by issued code (exact match).
    pub async fn find_by_code(
        pool: &PgPool,
        code: &str,
    ) -> Result<Option<Participant>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM participants WHERE unique_code = $1");
        sqlx::query_as::<_, Participant>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// Find a participant by name, ignoring case and surrounding whitespace.
    pub async fn find_by_name(
        pool: &PgPool,
        full_name: &str,
    ) -> Result<Option<Participant>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM participants WHERE LOWER(full_name) = LOWER(TRIM($1))"
        );
        sqlx::query_as::<_, Participant>(&query)
            .bind(full_name)
            .fetch_optional(pool)
            .await
    }

    /// List all participants ordered by ID.
    pub async fn list(pool: &PgPool) -> Result<Vec<Participant>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM participants ORDER BY id");
        sqlx::query_as::<_, Participant>(&query)
            .fetch_all(pool)
            .await
    }

    /// Every code currently issued.
    pub async fn list_codes(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT unique_code FROM participants")
            .fetch_all(pool)
            .await
    }

    /// Update a participant. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateParticipant,
    ) -> Result<Option<Participant>, sqlx::Error> {
        let query = format!(
            "UPDATE participants SET
                profile_image = COALESCE($2, profile_image),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Participant>(&query)
            .bind(id)
            .bind(&input.profile_image)
            .fetch_optional(pool)
            .await
    }

    /// Find a participant joined with its team.
    pub async fn find_with_team(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ParticipantWithTeam>, sqlx::Error> {
        sqlx::query_as::<_, ParticipantTeamRow>(
            "SELECT p.id, p.full_name, p.team_id, p.unique_code, p.profile_image, \
                    p.created_at, p.updated_at, \
                    t.name AS team_name, t.code AS team_code, t.created_at AS team_created_at \
             FROM participants p \
             JOIN teams t ON t.id = p.team_id \
             WHERE p.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map(|row| row.map(ParticipantWithTeam::from))
    }
}
