//! Handlers for the `/teams` resource.

use axum::extract::{Path, State};
use axum::Json;
use fest_core::error::CoreError;
use fest_core::types::DbId;
use fest_db::models::team::Team;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/teams
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Team>>>> {
    let teams = state.registry.list_teams().await?;
    Ok(Json(DataResponse { data: teams }))
}

/// GET /api/v1/teams/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Team>>> {
    let team = state
        .registry
        .find_team(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Team", id }))?;
    Ok(Json(DataResponse { data: team }))
}
