//! Repository for the `programs` table.

use fest_core::types::DbId;
use sqlx::PgPool;

use crate::models::program::{CreateProgram, Program, ProgramFilter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, program_type, participation_type, description, created_at";

/// Provides read and insert operations for programs.
pub struct ProgramRepo;

impl ProgramRepo {
    /// Insert a new program, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProgram) -> Result<Program, sqlx::Error> {
        let query = format!(
            "INSERT INTO programs (name, program_type, participation_type, description)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Program>(&query)
            .bind(&input.name)
            .bind(input.program_type.as_str())
            .bind(input.participation_type.as_str())
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a program by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Program>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM programs WHERE id = $1");
        sqlx::query_as::<_, Program>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List programs ordered by ID, applying any filters that are set.
    pub async fn list(pool: &PgPool, filter: &ProgramFilter) -> Result<Vec<Program>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM programs
             WHERE ($1::TEXT IS NULL OR program_type = $1)
               AND ($2::TEXT IS NULL OR participation_type = $2)
             ORDER BY id"
        );
        sqlx::query_as::<_, Program>(&query)
            .bind(filter.program_type.map(|t| t.as_str()))
            .bind(filter.participation_type.map(|t| t.as_str()))
            .fetch_all(pool)
            .await
    }
}
