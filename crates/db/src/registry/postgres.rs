//! PostgreSQL-backed [`Registry`].

use std::collections::HashSet;

use async_trait::async_trait;
use fest_core::types::DbId;

use super::{Registry, RegistryError, RegistryResult};
use crate::models::participant::{
    CreateParticipant, Participant, ParticipantWithTeam, UpdateParticipant,
};
use crate::models::program::{CreateProgram, Program, ProgramFilter};
use crate::models::registration::{
    CreateEnrollment, CreateRegistration, ProgramRegistrationCount, Registration,
    RegistrationFilter, RegistrationWithDetails,
};
use crate::models::team::{CreateTeam, Team};
use crate::repositories::{ParticipantRepo, ProgramRepo, RegistrationRepo, TeamRepo};
use crate::DbPool;

/// Registry over a PostgreSQL pool. Cheap to clone.
#[derive(Clone)]
pub struct PgRegistry {
    pool: DbPool,
}

impl PgRegistry {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// The underlying pool.
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl Registry for PgRegistry {
    async fn health_check(&self) -> RegistryResult<()> {
        Ok(crate::health_check(&self.pool).await?)
    }

    async fn list_teams(&self) -> RegistryResult<Vec<Team>> {
        Ok(TeamRepo::list(&self.pool).await?)
    }

    async fn find_team(&self, id: DbId) -> RegistryResult<Option<Team>> {
        Ok(TeamRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_team_by_code(&self, code: &str) -> RegistryResult<Option<Team>> {
        Ok(TeamRepo::find_by_code(&self.pool, code).await?)
    }

    async fn create_team(&self, input: &CreateTeam) -> RegistryResult<Team> {
        Ok(TeamRepo::create(&self.pool, input).await?)
    }

    async fn list_programs(&self, filter: &ProgramFilter) -> RegistryResult<Vec<Program>> {
        Ok(ProgramRepo::list(&self.pool, filter).await?)
    }

    async fn find_program(&self, id: DbId) -> RegistryResult<Option<Program>> {
        Ok(ProgramRepo::find_by_id(&self.pool, id).await?)
    }

    async fn create_program(&self, input: &CreateProgram) -> RegistryResult<Program> {
        Ok(ProgramRepo::create(&self.pool, input).await?)
    }

    async fn list_participants(&self) -> RegistryResult<Vec<Participant>> {
        Ok(ParticipantRepo::list(&self.pool).await?)
    }

    async fn find_participant(&self, id: DbId) -> RegistryResult<Option<Participant>> {
        Ok(ParticipantRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_participant_by_code(&self, code: &str) -> RegistryResult<Option<Participant>> {
        Ok(ParticipantRepo::find_by_code(&self.pool, code).await?)
    }

    async fn find_participant_by_name(
        &self,
        full_name: &str,
    ) -> RegistryResult<Option<Participant>> {
        Ok(ParticipantRepo::find_by_name(&self.pool, full_name).await?)
    }

    async fn list_unique_codes(&self) -> RegistryResult<HashSet<String>> {
        let codes = ParticipantRepo::list_codes(&self.pool).await?;
        Ok(codes.into_iter().collect())
    }

    async fn create_participant(&self, input: &CreateParticipant) -> RegistryResult<Participant> {
        Ok(ParticipantRepo::create(&self.pool, input).await?)
    }

    async fn update_participant(
        &self,
        id: DbId,
        input: &UpdateParticipant,
    ) -> RegistryResult<Option<Participant>> {
        Ok(ParticipantRepo::update(&self.pool, id, input).await?)
    }

    async fn list_registrations(&self, participant_id: DbId) -> RegistryResult<Vec<Registration>> {
        Ok(RegistrationRepo::list_by_participant(&self.pool, participant_id).await?)
    }

    async fn find_registration(&self, id: DbId) -> RegistryResult<Option<Registration>> {
        Ok(RegistrationRepo::find_by_id(&self.pool, id).await?)
    }

    async fn create_registration(
        &self,
        input: &CreateRegistration,
    ) -> RegistryResult<Registration> {
        Ok(RegistrationRepo::create(&self.pool, input).await?)
    }

    async fn enroll(&self, input: &CreateEnrollment) -> RegistryResult<usize> {
        RegistrationRepo::enroll(&self.pool, input)
            .await?
            .ok_or(RegistryError::NotFound {
                entity: "Participant",
                id: input.participant_id,
            })
    }

    async fn delete_registration(&self, id: DbId) -> RegistryResult<bool> {
        Ok(RegistrationRepo::delete(&self.pool, id).await?)
    }

    async fn resolve_participant_with_team(&self, id: DbId) -> RegistryResult<ParticipantWithTeam> {
        ParticipantRepo::find_with_team(&self.pool, id)
            .await?
            .ok_or(RegistryError::NotFound {
                entity: "Participant",
                id,
            })
    }

    async fn resolve_registrations_with_details(
        &self,
        filter: &RegistrationFilter,
    ) -> RegistryResult<Vec<RegistrationWithDetails>> {
        Ok(RegistrationRepo::list_with_details(&self.pool, filter).await?)
    }

    async fn count_registrations_by_program(
        &self,
    ) -> RegistryResult<Vec<ProgramRegistrationCount>> {
        Ok(RegistrationRepo::count_by_program(&self.pool).await?)
    }
}
