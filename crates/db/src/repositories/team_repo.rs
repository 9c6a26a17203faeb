//! Repository for the `teams` table.

use fest_core::types::DbId;
use sqlx::PgPool;

use crate::models::team::{CreateTeam, Team};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, code, created_at";

/// Provides read and insert operations for teams.
pub struct TeamRepo;

impl TeamRepo {
    /// Insert a new team, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateTeam) -> Result<Team, sqlx::Error> {
        let query = format!(
            "INSERT INTO teams (name, code)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Team>(&query)
            .bind(&input.name)
            .bind(&input.code)
            .fetch_one(pool)
            .await
    }

    /// Find a team by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Team>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM teams WHERE id = $1");
        sqlx::query_as::<_, Team>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a team by its code prefix.
    pub async fn find_by_code(pool: &PgPool, code: &str) -> Result<Option<Team>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM teams WHERE code = $1");
        sqlx::query_as::<_, Team>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// List all teams ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Team>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM teams ORDER BY name");
        sqlx::query_as::<_, Team>(&query).fetch_all(pool).await
    }
}
