//! Handlers for `/reports`: the flat registration export and per-program
//! counts.

use axum::extract::{Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use fest_core::export::build_csv;
use fest_core::program::{ParticipationType, ProgramType};
use fest_core::types::{DbId, Timestamp};
use fest_db::models::participant::ParticipantWithTeam;
use fest_db::models::registration::{
    ProgramRegistrationCount, RegistrationFilter, RegistrationWithDetails,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Column order of the CSV export.
pub const EXPORT_COLUMNS: [&str; 9] = [
    "registration_id",
    "registered_at",
    "participant",
    "unique_code",
    "team",
    "team_code",
    "program",
    "program_type",
    "participation_type",
];

/// One flat export row. Field order matches [`EXPORT_COLUMNS`].
#[derive(Debug, Serialize)]
pub struct ExportRow {
    pub registration_id: DbId,
    pub registered_at: Timestamp,
    pub participant: String,
    pub unique_code: String,
    pub team: String,
    pub team_code: String,
    pub program: String,
    pub program_type: ProgramType,
    pub participation_type: ParticipationType,
}

impl From<RegistrationWithDetails> for ExportRow {
    fn from(r: RegistrationWithDetails) -> Self {
        let ParticipantWithTeam { participant, team } = r.participant;
        Self {
            registration_id: r.id,
            registered_at: r.registered_at,
            participant: participant.full_name,
            unique_code: participant.unique_code,
            team: team.name,
            team_code: team.code,
            program: r.program.name,
            program_type: r.program.program_type,
            participation_type: r.program.participation_type,
        }
    }
}

impl ExportRow {
    fn cells(&self) -> Vec<String> {
        vec![
            self.registration_id.to_string(),
            self.registered_at.to_rfc3339(),
            self.participant.clone(),
            self.unique_code.clone(),
            self.team.clone(),
            self.team_code.clone(),
            self.program.clone(),
            self.program_type.to_string(),
            self.participation_type.to_string(),
        ]
    }
}

/// Query parameters for `GET /reports/registrations`.
#[derive(Debug, Deserialize)]
pub struct ExportParams {
    /// `json` (default) or `csv`.
    pub format: Option<String>,
    pub participant_id: Option<DbId>,
    pub program_id: Option<DbId>,
}

/// GET /api/v1/reports/registrations?format=json|csv&participant_id=&program_id=
///
/// One row per resolvable registration. Registrations whose participant,
/// team or program is missing are left out.
pub async fn export_registrations(
    State(state): State<AppState>,
    Query(params): Query<ExportParams>,
) -> AppResult<Response> {
    let filter = RegistrationFilter {
        participant_id: params.participant_id,
        program_id: params.program_id,
    };
    let rows: Vec<ExportRow> = state
        .registry
        .resolve_registrations_with_details(&filter)
        .await?
        .into_iter()
        .map(ExportRow::from)
        .collect();

    match params.format.as_deref().unwrap_or("json") {
        "csv" => {
            let cells: Vec<Vec<String>> = rows.iter().map(ExportRow::cells).collect();
            let body = build_csv(&EXPORT_COLUMNS, &cells);
            Ok((
                StatusCode::OK,
                [
                    (CONTENT_TYPE, "text/csv"),
                    (
                        CONTENT_DISPOSITION,
                        "attachment; filename=\"registrations.csv\"",
                    ),
                ],
                body,
            )
                .into_response())
        }
        "json" => Ok(Json(DataResponse { data: rows }).into_response()),
        other => Err(AppError::BadRequest(format!(
            "Unsupported export format '{other}' (expected 'json' or 'csv')"
        ))),
    }
}

/// GET /api/v1/reports/programs
pub async fn program_counts(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ProgramRegistrationCount>>>> {
    let counts = state.registry.count_registrations_by_program().await?;
    Ok(Json(DataResponse { data: counts }))
}
