//! Repository for the `registrations` table.

use fest_core::types::DbId;
use sqlx::PgPool;

use crate::models::registration::{
    CreateEnrollment, CreateRegistration, ProgramRegistrationCount, Registration,
    RegistrationDetailRow, RegistrationFilter, RegistrationWithDetails,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, participant_id, program_id, registered_at";

/// Provides CRUD and report queries for registrations.
pub struct RegistrationRepo;

impl RegistrationRepo {
    /// Insert a new registration, returning the created row.
    ///
    /// `registered_at` is set by the database default.
    pub async fn create(
        pool: &PgPool,
        input: &CreateRegistration,
    ) -> Result<Registration, sqlx::Error> {
        let query = format!(
            "INSERT INTO registrations (participant_id, program_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Registration>(&query)
            .bind(input.participant_id)
            .bind(input.program_id)
            .fetch_one(pool)
            .await
    }

    /// Apply an enrollment in one transaction.
    ///
    /// Sets the profile image when given, then inserts one row per program,
    /// skipping pairs that already exist. Returns the number of rows
    /// inserted, or `None` if the participant does not exist. Any failure
    /// rolls back every write.
    pub async fn enroll(
        pool: &PgPool,
        input: &CreateEnrollment,
    ) -> Result<Option<usize>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let exists: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM participants WHERE id = $1 FOR UPDATE")
                .bind(input.participant_id)
                .fetch_optional(&mut *tx)
                .await?;
        if exists.is_none() {
            return Ok(None);
        }

        if let Some(image) = &input.profile_image {
            sqlx::query(
                "UPDATE participants SET profile_image = $2, updated_at = NOW() WHERE id = $1",
            )
            .bind(input.participant_id)
            .bind(image)
            .execute(&mut *tx)
            .await?;
        }

        let mut inserted = 0;
        for program_id in &input.program_ids {
            let result = sqlx::query(
                "INSERT INTO registrations (participant_id, program_id)
                 VALUES ($1, $2)
                 ON CONFLICT ON CONSTRAINT uq_registrations_participant_program DO NOTHING",
            )
            .bind(input.participant_id)
            .bind(program_id)
            .execute(&mut *tx)
            .await?;
            inserted += result.rows_affected() as usize;
        }

        tx.commit().await?;
        Ok(Some(inserted))
    }

    /// Find a registration by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Registration>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM registrations WHERE id = $1");
        sqlx::query_as::<_, Registration>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a participant's registrations in insertion order.
    pub async fn list_by_participant(
        pool: &PgPool,
        participant_id: DbId,
    ) -> Result<Vec<Registration>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM registrations WHERE participant_id = $1 ORDER BY id"
        );
        sqlx::query_as::<_, Registration>(&query)
            .bind(participant_id)
            .fetch_all(pool)
            .await
    }

    /// Permanently delete a registration by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM registrations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List registrations joined with participant, team and program.
    ///
    /// Inner joins drop any row whose references cannot be resolved.
    pub async fn list_with_details(
        pool: &PgPool,
        filter: &RegistrationFilter,
    ) -> Result<Vec<RegistrationWithDetails>, sqlx::Error> {
        let rows = sqlx::query_as::<_, RegistrationDetailRow>(
            "SELECT \
                r.id, r.registered_at, \
                p.id AS participant_id, \
                p.full_name AS participant_full_name, \
                p.unique_code AS participant_unique_code, \
                p.profile_image AS participant_profile_image, \
                p.created_at AS participant_created_at, \
                p.updated_at AS participant_updated_at, \
                t.id AS team_id, \
                t.name AS team_name, \
                t.code AS team_code, \
                t.created_at AS team_created_at, \
                pr.id AS program_id, \
                pr.name AS program_name, \
                pr.program_type, \
                pr.participation_type, \
                pr.description AS program_description, \
                pr.created_at AS program_created_at \
             FROM registrations r \
             JOIN participants p ON p.id = r.participant_id \
             JOIN teams t ON t.id = p.team_id \
             JOIN programs pr ON pr.id = r.program_id \
             WHERE ($1::BIGINT IS NULL OR r.participant_id = $1) \
               AND ($2::BIGINT IS NULL OR r.program_id = $2) \
             ORDER BY r.id",
        )
        .bind(filter.participant_id)
        .bind(filter.program_id)
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(RegistrationWithDetails::from).collect())
    }

    /// Registration counts for every program, ordered by program ID.
    pub async fn count_by_program(
        pool: &PgPool,
    ) -> Result<Vec<ProgramRegistrationCount>, sqlx::Error> {
        sqlx::query_as::<_, ProgramRegistrationCount>(
            "SELECT pr.id, pr.name, pr.program_type, pr.participation_type, \
                    pr.description, pr.created_at, \
                    COUNT(p.id) AS registration_count \
             FROM programs pr \
             LEFT JOIN registrations r ON r.program_id = pr.id \
             LEFT JOIN participants p ON p.id = r.participant_id \
             GROUP BY pr.id \
             ORDER BY pr.id",
        )
        .fetch_all(pool)
        .await
    }
}
