//! Two-step participant onboarding.
//!
//! ```text
//! Unregistered --issue_code(name, team)--> CodeIssued
//! CodeIssued   --register_programs(code, programs)--> ProgramsRegistered
//! ```
//!
//! A returning participant re-enters at `CodeIssued` by presenting the code.
//! Deleting a registration does not move the participant between states.

use std::collections::HashSet;
use std::sync::Arc;

use fest_core::error::CoreError;
use fest_core::registration::{
    normalize_profile_image, programs_to_add, validate_profile_image, IssueCodeRequest,
    ProfileImageRequest, RegisterProgramsRequest,
};
use fest_core::types::DbId;
use fest_core::unique_code;
use fest_db::models::participant::{
    CreateParticipant, Participant, ParticipantWithTeam, UpdateParticipant,
};
use fest_db::models::registration::{
    CreateEnrollment, RegistrationFilter, RegistrationWithDetails,
};
use fest_db::models::team::Team;
use fest_db::registry::{Registry, UQ_PARTICIPANT_CODE, UQ_PARTICIPANT_NAME};
use serde::Serialize;

use crate::error::{WorkflowError, WorkflowResult};
use crate::issue_lock::IssueLocks;

/// Default number of code generation attempts before giving up.
pub const DEFAULT_MAX_CODE_ATTEMPTS: u32 = 5;

/// Result of step one.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedCode {
    pub participant: ParticipantWithTeam,
    pub unique_code: String,
}

/// A participant and everything they are registered for.
#[derive(Debug, Clone, Serialize)]
pub struct CodeLookup {
    pub participant: ParticipantWithTeam,
    pub registrations: Vec<RegistrationWithDetails>,
}

/// Result of step two.
#[derive(Debug, Clone, Serialize)]
pub struct ProgramRegistration {
    /// Every registration the participant now holds, old and new.
    pub registrations: Vec<RegistrationWithDetails>,
    /// How many rows this call created.
    pub new_count: usize,
}

/// Orchestrates code issuance and program enrollment over a [`Registry`].
pub struct RegistrationWorkflow {
    registry: Arc<dyn Registry>,
    issue_locks: IssueLocks,
    max_code_attempts: u32,
}

impl RegistrationWorkflow {
    pub fn new(registry: Arc<dyn Registry>) -> Self {
        Self {
            registry,
            issue_locks: IssueLocks::new(),
            max_code_attempts: DEFAULT_MAX_CODE_ATTEMPTS,
        }
    }

    /// Override the number of code generation attempts (at least one).
    pub fn with_max_code_attempts(mut self, attempts: u32) -> Self {
        self.max_code_attempts = attempts.max(1);
        self
    }

    /// The registry this workflow writes through.
    pub fn registry(&self) -> &Arc<dyn Registry> {
        &self.registry
    }

    // -----------------------------------------------------------------------
    // Step one
    // -----------------------------------------------------------------------

    /// Create a participant for `full_name` in `team_id` and issue their code.
    ///
    /// Fails with `Validation` for a malformed name, `InvalidTeam` for an
    /// unknown team, `DuplicateName` when the name is taken (ignoring case),
    /// and `Conflict` if every code attempt lost a race.
    pub async fn issue_code(&self, request: &IssueCodeRequest) -> WorkflowResult<IssuedCode> {
        let request = request.normalized()?;

        let team = self
            .registry
            .find_team(request.team_id)
            .await?
            .ok_or(CoreError::InvalidTeam(request.team_id))?;

        if self
            .registry
            .find_participant_by_name(&request.full_name)
            .await?
            .is_some()
        {
            return Err(CoreError::DuplicateName(request.full_name).into());
        }

        let participant = {
            let _guard = self.issue_locks.acquire(&team.code).await;
            self.create_with_fresh_code(&request, &team).await?
        };

        tracing::info!(
            participant_id = participant.id,
            team_id = team.id,
            code = %participant.unique_code,
            "Issued participant code"
        );

        Ok(IssuedCode {
            unique_code: participant.unique_code.clone(),
            participant: ParticipantWithTeam { participant, team },
        })
    }

    /// Generate a code from a fresh snapshot and insert, regenerating when
    /// the store reports the code was taken in the meantime.
    async fn create_with_fresh_code(
        &self,
        request: &IssueCodeRequest,
        team: &Team,
    ) -> WorkflowResult<Participant> {
        for attempt in 1..=self.max_code_attempts {
            let existing = self.registry.list_unique_codes().await?;
            let code = unique_code::generate(&team.code, &existing);

            let input = CreateParticipant {
                full_name: request.full_name.clone(),
                team_id: team.id,
                unique_code: code,
            };

            match self.registry.create_participant(&input).await {
                Ok(participant) => return Ok(participant),
                Err(e) if e.is_unique_violation(UQ_PARTICIPANT_CODE) => {
                    tracing::warn!(
                        attempt,
                        code = %input.unique_code,
                        "Participant code taken concurrently, regenerating"
                    );
                }
                Err(e) if e.is_unique_violation(UQ_PARTICIPANT_NAME) => {
                    return Err(CoreError::DuplicateName(input.full_name).into());
                }
                Err(e) => return Err(e.into()),
            }
        }

        tracing::error!(
            team_id = team.id,
            attempts = self.max_code_attempts,
            "Gave up issuing a participant code"
        );
        Err(CoreError::Conflict(format!(
            "Could not issue a unique code for team {} after {} attempts",
            team.code, self.max_code_attempts
        ))
        .into())
    }

    // -----------------------------------------------------------------------
    // Returning participants
    // -----------------------------------------------------------------------

    /// Look up the holder of `code` with their registrations.
    ///
    /// An unknown code always fails with `InvalidCode`.
    pub async fn lookup_by_code(&self, code: &str) -> WorkflowResult<CodeLookup> {
        let participant = self.participant_for_code(code).await?;
        let registrations = self.registrations_for(participant.id).await?;
        let participant = self
            .registry
            .resolve_participant_with_team(participant.id)
            .await?;

        Ok(CodeLookup {
            participant,
            registrations,
        })
    }

    /// Replace the profile image of the holder of `code`.
    pub async fn update_profile_image(
        &self,
        code: &str,
        request: &ProfileImageRequest,
    ) -> WorkflowResult<ParticipantWithTeam> {
        let image = normalize_profile_image(request.profile_image.as_deref()).ok_or_else(|| {
            CoreError::Validation("Profile image URL is required".to_string())
        })?;
        validate_profile_image(&image)?;

        let participant = self.participant_for_code(code).await?;
        self.set_profile_image(participant.id, image).await?;

        Ok(self
            .registry
            .resolve_participant_with_team(participant.id)
            .await?)
    }

    // -----------------------------------------------------------------------
    // Step two
    // -----------------------------------------------------------------------

    /// Register the holder of a code for the requested programs.
    ///
    /// Programs the participant already holds are skipped without error, so
    /// re-submitting the same list is harmless. Every precondition is checked
    /// before writing, and the profile image and new rows are applied as one
    /// [`Registry::enroll`] call.
    pub async fn register_programs(
        &self,
        request: &RegisterProgramsRequest,
    ) -> WorkflowResult<ProgramRegistration> {
        let request = request.normalized()?;
        let participant = self.participant_for_code(&request.unique_code).await?;
        self.ensure_programs_exist(&request.program_ids).await?;

        let already: HashSet<DbId> = self
            .registry
            .list_registrations(participant.id)
            .await?
            .into_iter()
            .map(|r| r.program_id)
            .collect();

        // Image and rows are written together or not at all.
        let enrollment = CreateEnrollment {
            participant_id: participant.id,
            profile_image: request.profile_image.clone(),
            program_ids: programs_to_add(&request.program_ids, &already),
        };
        let new_count = self.registry.enroll(&enrollment).await?;

        tracing::info!(
            participant_id = participant.id,
            requested = request.program_ids.len(),
            new_count,
            "Registered programs"
        );

        let registrations = self.registrations_for(participant.id).await?;
        Ok(ProgramRegistration {
            registrations,
            new_count,
        })
    }

    /// Remove a single registration. Returns `false` if it did not exist.
    pub async fn delete_registration(&self, id: DbId) -> WorkflowResult<bool> {
        let deleted = self.registry.delete_registration(id).await?;
        if deleted {
            tracing::info!(registration_id = id, "Deleted registration");
        }
        Ok(deleted)
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    async fn participant_for_code(&self, code: &str) -> WorkflowResult<Participant> {
        let code = code.trim();
        self.registry
            .find_participant_by_code(code)
            .await?
            .ok_or_else(|| WorkflowError::Core(CoreError::InvalidCode(code.to_string())))
    }

    async fn ensure_programs_exist(&self, program_ids: &[DbId]) -> WorkflowResult<()> {
        let unique: HashSet<DbId> = program_ids.iter().copied().collect();
        for program_id in unique {
            if self.registry.find_program(program_id).await?.is_none() {
                return Err(CoreError::Validation(format!(
                    "Program with id {program_id} does not exist"
                ))
                .into());
            }
        }
        Ok(())
    }

    async fn set_profile_image(&self, participant_id: DbId, image: String) -> WorkflowResult<()> {
        self.registry
            .update_participant(
                participant_id,
                &UpdateParticipant {
                    profile_image: Some(image),
                },
            )
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Participant",
                id: participant_id,
            })?;
        Ok(())
    }

    async fn registrations_for(
        &self,
        participant_id: DbId,
    ) -> WorkflowResult<Vec<RegistrationWithDetails>> {
        Ok(self
            .registry
            .resolve_registrations_with_details(&RegistrationFilter {
                participant_id: Some(participant_id),
                program_id: None,
            })
            .await?)
    }
}
