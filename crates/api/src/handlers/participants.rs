//! Handlers for the `/participants` resource.
//!
//! Issuing a code is step one of registration; the `code/{code}` routes
//! serve returning participants.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use fest_core::registration::{IssueCodeRequest, ProfileImageRequest};
use fest_core::types::DbId;
use fest_db::models::participant::ParticipantWithTeam;
use fest_registration::{CodeLookup, IssuedCode};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/participants
pub async fn issue_code(
    State(state): State<AppState>,
    Json(input): Json<IssueCodeRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<IssuedCode>>)> {
    let issued = state.workflow.issue_code(&input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: issued })))
}

/// GET /api/v1/participants/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ParticipantWithTeam>>> {
    let participant = state.registry.resolve_participant_with_team(id).await?;
    Ok(Json(DataResponse { data: participant }))
}

/// GET /api/v1/participants/code/{code}
pub async fn lookup_by_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> AppResult<Json<DataResponse<CodeLookup>>> {
    let lookup = state.workflow.lookup_by_code(&code).await?;
    Ok(Json(DataResponse { data: lookup }))
}

/// PUT /api/v1/participants/code/{code}/profile-image
pub async fn update_profile_image(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(input): Json<ProfileImageRequest>,
) -> AppResult<Json<DataResponse<ParticipantWithTeam>>> {
    let participant = state.workflow.update_profile_image(&code, &input).await?;
    Ok(Json(DataResponse { data: participant }))
}
