//! In-memory [`Registry`] backed by keyed maps with sequential ids.
//!
//! All tables live behind one `RwLock`, so every write (including its
//! uniqueness checks) is atomic with respect to other callers.

use std::collections::{BTreeMap, HashSet};

use async_trait::async_trait;
use fest_core::registration::name_key;
use fest_core::types::DbId;
use tokio::sync::RwLock;

use super::{
    Registry, RegistryError, RegistryResult, UQ_PARTICIPANT_CODE, UQ_PARTICIPANT_NAME,
    UQ_REGISTRATION_PAIR, UQ_TEAM_CODE, UQ_TEAM_NAME,
};
use crate::models::participant::{
    CreateParticipant, Participant, ParticipantWithTeam, UpdateParticipant,
};
use crate::models::program::{CreateProgram, Program, ProgramFilter};
use crate::models::registration::{
    CreateEnrollment, CreateRegistration, ProgramRegistrationCount, Registration,
    RegistrationFilter, RegistrationWithDetails,
};
use crate::models::team::{CreateTeam, Team};
use crate::seed;

#[derive(Default)]
struct Tables {
    teams: BTreeMap<DbId, Team>,
    programs: BTreeMap<DbId, Program>,
    participants: BTreeMap<DbId, Participant>,
    registrations: BTreeMap<DbId, Registration>,
    last_team_id: DbId,
    last_program_id: DbId,
    last_participant_id: DbId,
    last_registration_id: DbId,
}

fn unique_violation(constraint: &str) -> RegistryError {
    RegistryError::UniqueViolation {
        constraint: constraint.to_string(),
    }
}

impl Tables {
    fn insert_team(&mut self, input: &CreateTeam) -> RegistryResult<Team> {
        if self.teams.values().any(|t| t.name == input.name) {
            return Err(unique_violation(UQ_TEAM_NAME));
        }
        if self.teams.values().any(|t| t.code == input.code) {
            return Err(unique_violation(UQ_TEAM_CODE));
        }
        self.last_team_id += 1;
        let team = Team {
            id: self.last_team_id,
            name: input.name.clone(),
            code: input.code.clone(),
            created_at: chrono::Utc::now(),
        };
        self.teams.insert(team.id, team.clone());
        Ok(team)
    }

    fn insert_program(&mut self, input: &CreateProgram) -> Program {
        self.last_program_id += 1;
        let program = Program {
            id: self.last_program_id,
            name: input.name.clone(),
            program_type: input.program_type,
            participation_type: input.participation_type,
            description: input.description.clone(),
            created_at: chrono::Utc::now(),
        };
        self.programs.insert(program.id, program.clone());
        program
    }

    fn insert_participant(&mut self, input: &CreateParticipant) -> RegistryResult<Participant> {
        if !self.teams.contains_key(&input.team_id) {
            return Err(RegistryError::NotFound {
                entity: "Team",
                id: input.team_id,
            });
        }
        if self
            .participants
            .values()
            .any(|p| p.unique_code == input.unique_code)
        {
            return Err(unique_violation(UQ_PARTICIPANT_CODE));
        }
        let key = name_key(&input.full_name);
        if self
            .participants
            .values()
            .any(|p| name_key(&p.full_name) == key)
        {
            return Err(unique_violation(UQ_PARTICIPANT_NAME));
        }

        self.last_participant_id += 1;
        let now = chrono::Utc::now();
        let participant = Participant {
            id: self.last_participant_id,
            full_name: input.full_name.clone(),
            team_id: input.team_id,
            unique_code: input.unique_code.clone(),
            profile_image: None,
            created_at: now,
            updated_at: now,
        };
        self.participants
            .insert(participant.id, participant.clone());
        Ok(participant)
    }

    fn insert_registration(&mut self, input: &CreateRegistration) -> RegistryResult<Registration> {
        if !self.participants.contains_key(&input.participant_id) {
            return Err(RegistryError::NotFound {
                entity: "Participant",
                id: input.participant_id,
            });
        }
        if !self.programs.contains_key(&input.program_id) {
            return Err(RegistryError::NotFound {
                entity: "Program",
                id: input.program_id,
            });
        }
        if self.registrations.values().any(|r| {
            r.participant_id == input.participant_id && r.program_id == input.program_id
        }) {
            return Err(unique_violation(UQ_REGISTRATION_PAIR));
        }

        self.last_registration_id += 1;
        let registration = Registration {
            id: self.last_registration_id,
            participant_id: input.participant_id,
            program_id: input.program_id,
            registered_at: chrono::Utc::now(),
        };
        self.registrations
            .insert(registration.id, registration.clone());
        Ok(registration)
    }

    /// Validate every reference first so a rejected enrollment writes nothing.
    fn enroll(&mut self, input: &CreateEnrollment) -> RegistryResult<usize> {
        if !self.participants.contains_key(&input.participant_id) {
            return Err(RegistryError::NotFound {
                entity: "Participant",
                id: input.participant_id,
            });
        }
        if let Some(&missing) = input
            .program_ids
            .iter()
            .find(|id| !self.programs.contains_key(*id))
        {
            return Err(RegistryError::NotFound {
                entity: "Program",
                id: missing,
            });
        }

        if let Some(image) = &input.profile_image {
            if let Some(participant) = self.participants.get_mut(&input.participant_id) {
                participant.profile_image = Some(image.clone());
                participant.updated_at = chrono::Utc::now();
            }
        }

        let mut inserted = 0;
        for &program_id in &input.program_ids {
            let pair = CreateRegistration {
                participant_id: input.participant_id,
                program_id,
            };
            match self.insert_registration(&pair) {
                Ok(_) => inserted += 1,
                Err(e) if e.is_unique_violation(UQ_REGISTRATION_PAIR) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(inserted)
    }

    fn participant_with_team(&self, participant: &Participant) -> Option<ParticipantWithTeam> {
        let team = self.teams.get(&participant.team_id)?;
        Some(ParticipantWithTeam {
            participant: participant.clone(),
            team: team.clone(),
        })
    }

    fn registration_with_details(
        &self,
        registration: &Registration,
    ) -> Option<RegistrationWithDetails> {
        let participant = self.participants.get(&registration.participant_id)?;
        let program = self.programs.get(&registration.program_id)?;
        Some(RegistrationWithDetails {
            id: registration.id,
            registered_at: registration.registered_at,
            participant: self.participant_with_team(participant)?,
            program: program.clone(),
        })
    }
}

/// Registry that keeps everything in process memory.
#[derive(Default)]
pub struct MemoryRegistry {
    tables: RwLock<Tables>,
}

impl MemoryRegistry {
    /// Create an empty registry with no teams or programs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the standard seed teams and programs.
    pub fn seeded() -> Self {
        let mut tables = Tables::default();
        for team in seed::teams() {
            tables
                .insert_team(&team)
                .expect("seed teams are distinct");
        }
        for program in seed::programs() {
            tables.insert_program(&program);
        }
        Self {
            tables: RwLock::new(tables),
        }
    }

    /// Insert a registration row without reference checks.
    #[cfg(test)]
    async fn insert_raw_registration(&self, participant_id: DbId, program_id: DbId) -> DbId {
        let mut tables = self.tables.write().await;
        tables.last_registration_id += 1;
        let id = tables.last_registration_id;
        tables.registrations.insert(
            id,
            Registration {
                id,
                participant_id,
                program_id,
                registered_at: chrono::Utc::now(),
            },
        );
        id
    }
}

#[async_trait]
impl Registry for MemoryRegistry {
    async fn health_check(&self) -> RegistryResult<()> {
        Ok(())
    }

    async fn list_teams(&self) -> RegistryResult<Vec<Team>> {
        let tables = self.tables.read().await;
        let mut teams: Vec<Team> = tables.teams.values().cloned().collect();
        teams.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(teams)
    }

    async fn find_team(&self, id: DbId) -> RegistryResult<Option<Team>> {
        Ok(self.tables.read().await.teams.get(&id).cloned())
    }

    async fn find_team_by_code(&self, code: &str) -> RegistryResult<Option<Team>> {
        Ok(self
            .tables
            .read()
            .await
            .teams
            .values()
            .find(|t| t.code == code)
            .cloned())
    }

    async fn create_team(&self, input: &CreateTeam) -> RegistryResult<Team> {
        self.tables.write().await.insert_team(input)
    }

    async fn list_programs(&self, filter: &ProgramFilter) -> RegistryResult<Vec<Program>> {
        Ok(self
            .tables
            .read()
            .await
            .programs
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect())
    }

    async fn find_program(&self, id: DbId) -> RegistryResult<Option<Program>> {
        Ok(self.tables.read().await.programs.get(&id).cloned())
    }

    async fn create_program(&self, input: &CreateProgram) -> RegistryResult<Program> {
        Ok(self.tables.write().await.insert_program(input))
    }

    async fn list_participants(&self) -> RegistryResult<Vec<Participant>> {
        Ok(self
            .tables
            .read()
            .await
            .participants
            .values()
            .cloned()
            .collect())
    }

    async fn find_participant(&self, id: DbId) -> RegistryResult<Option<Participant>> {
        Ok(self.tables.read().await.participants.get(&id).cloned())
    }

    async fn find_participant_by_code(&self, code: &str) -> RegistryResult<Option<Participant>> {
        Ok(self
            .tables
            .read()
            .await
            .participants
            .values()
            .find(|p| p.unique_code == code)
            .cloned())
    }

    async fn find_participant_by_name(
        &self,
        full_name: &str,
    ) -> RegistryResult<Option<Participant>> {
        let key = name_key(full_name);
        Ok(self
            .tables
            .read()
            .await
            .participants
            .values()
            .find(|p| name_key(&p.full_name) == key)
            .cloned())
    }

    async fn list_unique_codes(&self) -> RegistryResult<HashSet<String>> {
        Ok(self
            .tables
            .read()
            .await
            .participants
            .values()
            .map(|p| p.unique_code.clone())
            .collect())
    }

    async fn create_participant(&self, input: &CreateParticipant) -> RegistryResult<Participant> {
        self.tables.write().await.insert_participant(input)
    }

    async fn update_participant(
        &self,
        id: DbId,
        input: &UpdateParticipant,
    ) -> RegistryResult<Option<Participant>> {
        let mut tables = self.tables.write().await;
        let Some(participant) = tables.participants.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(image) = &input.profile_image {
            participant.profile_image = Some(image.clone());
        }
        participant.updated_at = chrono::Utc::now();
        Ok(Some(participant.clone()))
    }

    async fn list_registrations(&self, participant_id: DbId) -> RegistryResult<Vec<Registration>> {
        Ok(self
            .tables
            .read()
            .await
            .registrations
            .values()
            .filter(|r| r.participant_id == participant_id)
            .cloned()
            .collect())
    }

    async fn find_registration(&self, id: DbId) -> RegistryResult<Option<Registration>> {
        Ok(self.tables.read().await.registrations.get(&id).cloned())
    }

    async fn create_registration(
        &self,
        input: &CreateRegistration,
    ) -> RegistryResult<Registration> {
        self.tables.write().await.insert_registration(input)
    }

    async fn enroll(&self, input: &CreateEnrollment) -> RegistryResult<usize> {
        self.tables.write().await.enroll(input)
    }

    async fn delete_registration(&self, id: DbId) -> RegistryResult<bool> {
        Ok(self.tables.write().await.registrations.remove(&id).is_some())
    }

    async fn resolve_participant_with_team(&self, id: DbId) -> RegistryResult<ParticipantWithTeam> {
        let tables = self.tables.read().await;
        let participant = tables.participants.get(&id).ok_or(RegistryError::NotFound {
            entity: "Participant",
            id,
        })?;
        tables
            .participant_with_team(participant)
            .ok_or(RegistryError::NotFound {
                entity: "Team",
                id: participant.team_id,
            })
    }

    async fn resolve_registrations_with_details(
        &self,
        filter: &RegistrationFilter,
    ) -> RegistryResult<Vec<RegistrationWithDetails>> {
        let tables = self.tables.read().await;
        Ok(tables
            .registrations
            .values()
            .filter(|r| filter.participant_id.map_or(true, |id| r.participant_id == id))
            .filter(|r| filter.program_id.map_or(true, |id| r.program_id == id))
            .filter_map(|r| tables.registration_with_details(r))
            .collect())
    }

    async fn count_registrations_by_program(
        &self,
    ) -> RegistryResult<Vec<ProgramRegistrationCount>> {
        let tables = self.tables.read().await;
        Ok(tables
            .programs
            .values()
            .map(|program| {
                let registration_count = tables
                    .registrations
                    .values()
                    .filter(|r| {
                        r.program_id == program.id
                            && tables.participants.contains_key(&r.participant_id)
                    })
                    .count() as i64;
                ProgramRegistrationCount {
                    program: program.clone(),
                    registration_count,
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn participant(name: &str, team_id: DbId, code: &str) -> CreateParticipant {
        CreateParticipant {
            full_name: name.to_string(),
            team_id,
            unique_code: code.to_string(),
        }
    }

    fn registration(participant_id: DbId, program_id: DbId) -> CreateRegistration {
        CreateRegistration {
            participant_id,
            program_id,
        }
    }

    fn enrollment(
        participant_id: DbId,
        image: Option<&str>,
        program_ids: &[DbId],
    ) -> CreateEnrollment {
        CreateEnrollment {
            participant_id,
            profile_image: image.map(str::to_string),
            program_ids: program_ids.to_vec(),
        }
    }

    #[tokio::test]
    async fn enroll_sets_image_and_skips_existing_pairs() {
        let registry = MemoryRegistry::seeded();
        let p = registry
            .create_participant(&participant("Asha Menon", 1, "QU001"))
            .await
            .unwrap();
        registry.create_registration(&registration(p.id, 2)).await.unwrap();

        let inserted = registry
            .enroll(&enrollment(p.id, Some("https://img.example/asha.png"), &[1, 2, 3]))
            .await
            .unwrap();
        assert_eq!(inserted, 2);

        let programs: Vec<DbId> = registry
            .list_registrations(p.id)
            .await
            .unwrap()
            .iter()
            .map(|r| r.program_id)
            .collect();
        assert_eq!(programs, vec![2, 1, 3]);
        let stored = registry.find_participant(p.id).await.unwrap().unwrap();
        assert_eq!(stored.profile_image.as_deref(), Some("https://img.example/asha.png"));
    }

    #[tokio::test]
    async fn rejected_enrollment_writes_nothing() {
        let registry = MemoryRegistry::seeded();
        let p = registry
            .create_participant(&participant("Asha Menon", 1, "QU001"))
            .await
            .unwrap();

        let err = registry
            .enroll(&enrollment(p.id, Some("https://img.example/asha.png"), &[1, 99]))
            .await
            .unwrap_err();
        assert_matches!(err, RegistryError::NotFound { entity: "Program", id: 99 });

        assert!(registry.list_registrations(p.id).await.unwrap().is_empty());
        let stored = registry.find_participant(p.id).await.unwrap().unwrap();
        assert_eq!(stored.profile_image, None);

        let err = registry.enroll(&enrollment(404, None, &[1])).await.unwrap_err();
        assert_matches!(err, RegistryError::NotFound { entity: "Participant", id: 404 });
    }

    #[tokio::test]
    async fn seeded_registry_has_teams_and_programs() {
        let registry = MemoryRegistry::seeded();
        assert_eq!(registry.list_teams().await.unwrap().len(), seed::TEAMS.len());
        let programs = registry.list_programs(&ProgramFilter::default()).await.unwrap();
        assert_eq!(programs.len(), seed::PROGRAMS.len());
        let quasar = registry.find_team_by_code("QU").await.unwrap().unwrap();
        assert_eq!(quasar.id, 1);
        assert_eq!(quasar.name, "Quasar");
    }

    #[tokio::test]
    async fn ids_are_sequential() {
        let registry = MemoryRegistry::seeded();
        let a = registry
            .create_participant(&participant("Asha Menon", 1, "QU001"))
            .await
            .unwrap();
        let b = registry
            .create_participant(&participant("Ben Okafor", 1, "QU002"))
            .await
            .unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(a.profile_image, None);
    }

    #[tokio::test]
    async fn duplicate_code_is_a_unique_violation() {
        let registry = MemoryRegistry::seeded();
        registry
            .create_participant(&participant("Asha Menon", 1, "QU001"))
            .await
            .unwrap();
        let err = registry
            .create_participant(&participant("Ben Okafor", 1, "QU001"))
            .await
            .unwrap_err();
        assert!(err.is_unique_violation(UQ_PARTICIPANT_CODE));
    }

    #[tokio::test]
    async fn duplicate_name_ignores_case() {
        let registry = MemoryRegistry::seeded();
        registry
            .create_participant(&participant("Asha Menon", 1, "QU001"))
            .await
            .unwrap();
        let err = registry
            .create_participant(&participant("ASHA menon", 2, "NE001"))
            .await
            .unwrap_err();
        assert!(err.is_unique_violation(UQ_PARTICIPANT_NAME));

        let found = registry.find_participant_by_name("asha MENON").await.unwrap();
        assert_eq!(found.unwrap().unique_code, "QU001");
    }

    #[tokio::test]
    async fn participant_requires_existing_team() {
        let registry = MemoryRegistry::seeded();
        let err = registry
            .create_participant(&participant("Asha Menon", 99, "XX001"))
            .await
            .unwrap_err();
        assert_matches!(err, RegistryError::NotFound { entity: "Team", id: 99 });
    }

    #[tokio::test]
    async fn duplicate_team_code_is_rejected() {
        let registry = MemoryRegistry::seeded();
        let err = registry
            .create_team(&CreateTeam {
                name: "Quokka".into(),
                code: "QU".into(),
            })
            .await
            .unwrap_err();
        assert!(err.is_unique_violation(UQ_TEAM_CODE));
    }

    #[tokio::test]
    async fn registration_pair_is_unique() {
        let registry = MemoryRegistry::seeded();
        let p = registry
            .create_participant(&participant("Asha Menon", 1, "QU001"))
            .await
            .unwrap();
        registry.create_registration(&registration(p.id, 1)).await.unwrap();
        let err = registry
            .create_registration(&registration(p.id, 1))
            .await
            .unwrap_err();
        assert!(err.is_unique_violation(UQ_REGISTRATION_PAIR));
    }

    #[tokio::test]
    async fn update_sets_profile_image_only_when_given() {
        let registry = MemoryRegistry::seeded();
        let p = registry
            .create_participant(&participant("Asha Menon", 1, "QU001"))
            .await
            .unwrap();

        let updated = registry
            .update_participant(
                p.id,
                &UpdateParticipant {
                    profile_image: Some("https://img.example/asha.png".into()),
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            updated.profile_image.as_deref(),
            Some("https://img.example/asha.png")
        );

        let untouched = registry
            .update_participant(p.id, &UpdateParticipant::default())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(untouched.profile_image, updated.profile_image);
        assert_eq!(untouched.unique_code, "QU001");

        assert!(registry
            .update_participant(42, &UpdateParticipant::default())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn resolve_participant_with_team_joins_team() {
        let registry = MemoryRegistry::seeded();
        let p = registry
            .create_participant(&participant("Asha Menon", 2, "NE001"))
            .await
            .unwrap();
        let joined = registry.resolve_participant_with_team(p.id).await.unwrap();
        assert_eq!(joined.team.code, "NE");
        assert_eq!(joined.participant, p);

        let err = registry.resolve_participant_with_team(77).await.unwrap_err();
        assert_matches!(err, RegistryError::NotFound { entity: "Participant", id: 77 });
    }

    #[tokio::test]
    async fn orphaned_registrations_are_dropped_from_joins_and_counts() {
        let registry = MemoryRegistry::seeded();
        let p = registry
            .create_participant(&participant("Asha Menon", 1, "QU001"))
            .await
            .unwrap();
        let kept = registry.create_registration(&registration(p.id, 1)).await.unwrap();
        registry.insert_raw_registration(p.id, 999).await;
        registry.insert_raw_registration(555, 1).await;

        let rows = registry
            .resolve_registrations_with_details(&RegistrationFilter::default())
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, kept.id);
        assert_eq!(rows[0].program.id, 1);
        assert_eq!(rows[0].participant.team.code, "QU");

        let counts = registry.count_registrations_by_program().await.unwrap();
        let first = counts.iter().find(|c| c.program.id == 1).unwrap();
        assert_eq!(first.registration_count, 1);
    }

    #[tokio::test]
    async fn details_filter_by_participant_and_program() {
        let registry = MemoryRegistry::seeded();
        let a = registry
            .create_participant(&participant("Asha Menon", 1, "QU001"))
            .await
            .unwrap();
        let b = registry
            .create_participant(&participant("Ben Okafor", 2, "NE001"))
            .await
            .unwrap();
        for (pid, prog) in [(a.id, 1), (a.id, 2), (b.id, 2)] {
            registry
                .create_registration(&registration(pid, prog))
                .await
                .unwrap();
        }

        let for_a = registry
            .resolve_registrations_with_details(&RegistrationFilter {
                participant_id: Some(a.id),
                program_id: None,
            })
            .await
            .unwrap();
        assert_eq!(for_a.len(), 2);

        let for_program_2 = registry
            .resolve_registrations_with_details(&RegistrationFilter {
                participant_id: None,
                program_id: Some(2),
            })
            .await
            .unwrap();
        assert_eq!(for_program_2.len(), 2);
    }

    #[tokio::test]
    async fn delete_removes_only_that_row() {
        let registry = MemoryRegistry::seeded();
        let p = registry
            .create_participant(&participant("Asha Menon", 1, "QU001"))
            .await
            .unwrap();
        let r1 = registry.create_registration(&registration(p.id, 1)).await.unwrap();
        let r2 = registry.create_registration(&registration(p.id, 2)).await.unwrap();

        assert!(registry.delete_registration(r1.id).await.unwrap());
        assert!(!registry.delete_registration(r1.id).await.unwrap());

        let remaining = registry.list_registrations(p.id).await.unwrap();
        assert_eq!(remaining, vec![r2]);
    }

    #[tokio::test]
    async fn program_filter_applies_both_fields() {
        use fest_core::program::{ParticipationType, ProgramType};

        let registry = MemoryRegistry::seeded();
        let filter = ProgramFilter {
            program_type: Some(ProgramType::NonStage),
            participation_type: Some(ParticipationType::Group),
        };
        let programs = registry.list_programs(&filter).await.unwrap();
        assert_eq!(programs.len(), 1);
        assert_eq!(programs[0].name, "Quiz");
    }
}
