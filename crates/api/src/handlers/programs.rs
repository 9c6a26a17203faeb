//! Handlers for the `/programs` resource.

use axum::extract::{Path, Query, State};
use axum::Json;
use fest_core::error::CoreError;
use fest_core::types::DbId;
use fest_db::models::program::{Program, ProgramFilter};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/programs?program_type=&participation_type=
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<ProgramFilter>,
) -> AppResult<Json<DataResponse<Vec<Program>>>> {
    let programs = state.registry.list_programs(&filter).await?;
    Ok(Json(DataResponse { data: programs }))
}

/// GET /api/v1/programs/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Program>>> {
    let program = state
        .registry
        .find_program(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Program",
            id,
        }))?;
    Ok(Json(DataResponse { data: program }))
}
