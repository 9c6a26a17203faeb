//! Handlers for the `/registrations` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use fest_core::error::CoreError;
use fest_core::registration::RegisterProgramsRequest;
use fest_core::types::DbId;
use fest_db::models::registration::{RegistrationFilter, RegistrationWithDetails};
use fest_registration::ProgramRegistration;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /registrations`.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub participant_id: Option<DbId>,
}

/// POST /api/v1/registrations
///
/// Step two: register the holder of `unique_code` for programs. Programs
/// they already hold are skipped.
pub async fn register_programs(
    State(state): State<AppState>,
    Json(input): Json<RegisterProgramsRequest>,
) -> AppResult<Json<DataResponse<ProgramRegistration>>> {
    let result = state.workflow.register_programs(&input).await?;
    Ok(Json(DataResponse { data: result }))
}

/// GET /api/v1/registrations?participant_id=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<DataResponse<Vec<RegistrationWithDetails>>>> {
    let filter = RegistrationFilter {
        participant_id: params.participant_id,
        program_id: None,
    };
    let registrations = state
        .registry
        .resolve_registrations_with_details(&filter)
        .await?;
    Ok(Json(DataResponse {
        data: registrations,
    }))
}

/// DELETE /api/v1/registrations/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if state.workflow.delete_registration(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Registration",
            id,
        }))
    }
}
