//! Integration tests for the PostgreSQL registry.
//!
//! Exercises the repository layer against a real database:
//! - Seed data matches `fest_db::seed`
//! - Unique constraints surface as named `UniqueViolation`s
//! - Joined reads and per-program counts

use fest_core::program::{ParticipationType, ProgramType};
use fest_db::models::participant::{CreateParticipant, UpdateParticipant};
use fest_db::models::program::ProgramFilter;
use fest_db::models::registration::{CreateEnrollment, CreateRegistration, RegistrationFilter};
use fest_db::registry::{
    PgRegistry, Registry, RegistryError, UQ_PARTICIPANT_CODE, UQ_PARTICIPANT_NAME,
    UQ_REGISTRATION_PAIR,
};
use fest_db::seed;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_participant(name: &str, team_id: i64, code: &str) -> CreateParticipant {
    CreateParticipant {
        full_name: name.to_string(),
        team_id,
        unique_code: code.to_string(),
    }
}

fn new_registration(participant_id: i64, program_id: i64) -> CreateRegistration {
    CreateRegistration {
        participant_id,
        program_id,
    }
}

// ---------------------------------------------------------------------------
// Seed data
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_seed_teams_match_rust_seed(pool: PgPool) {
    fest_db::health_check(&pool).await.unwrap();
    let registry = PgRegistry::new(pool);

    for (index, (name, code)) in seed::TEAMS.iter().enumerate() {
        let team = registry
            .find_team_by_code(code)
            .await
            .unwrap()
            .unwrap_or_else(|| panic!("team {code} should be seeded"));
        assert_eq!(team.name, *name);
        assert_eq!(team.id, index as i64 + 1);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_seed_programs_match_rust_seed(pool: PgPool) {
    let registry = PgRegistry::new(pool);
    let programs = registry
        .list_programs(&ProgramFilter::default())
        .await
        .unwrap();

    assert_eq!(programs.len(), seed::PROGRAMS.len());
    for (program, (name, program_type, participation_type, _)) in
        programs.iter().zip(seed::PROGRAMS)
    {
        assert_eq!(program.name, *name);
        assert_eq!(program.program_type, *program_type);
        assert_eq!(program.participation_type, *participation_type);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_program_filter(pool: PgPool) {
    let registry = PgRegistry::new(pool);
    let stage_groups = registry
        .list_programs(&ProgramFilter {
            program_type: Some(ProgramType::Stage),
            participation_type: Some(ParticipationType::Group),
        })
        .await
        .unwrap();

    let names: Vec<&str> = stage_groups.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Group Song", "Drama"]);
}

// ---------------------------------------------------------------------------
// Participants
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_code_violates_named_constraint(pool: PgPool) {
    let registry = PgRegistry::new(pool);
    registry
        .create_participant(&new_participant("Asha Menon", 1, "QU001"))
        .await
        .unwrap();

    let err = registry
        .create_participant(&new_participant("Ben Okafor", 1, "QU001"))
        .await
        .unwrap_err();
    assert!(
        err.is_unique_violation(UQ_PARTICIPANT_CODE),
        "expected code violation, got {err:?}"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_name_ignores_case(pool: PgPool) {
    let registry = PgRegistry::new(pool);
    registry
        .create_participant(&new_participant("Asha Menon", 1, "QU001"))
        .await
        .unwrap();

    let found = registry
        .find_participant_by_name("  asha MENON ")
        .await
        .unwrap();
    assert_eq!(found.unwrap().unique_code, "QU001");

    let err = registry
        .create_participant(&new_participant("ASHA MENON", 2, "NE001"))
        .await
        .unwrap_err();
    assert!(err.is_unique_violation(UQ_PARTICIPANT_NAME));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_unique_codes(pool: PgPool) {
    let registry = PgRegistry::new(pool);
    for (name, code) in [("Asha Menon", "QU001"), ("Ben Okafor", "QU002")] {
        registry
            .create_participant(&new_participant(name, 1, code))
            .await
            .unwrap();
    }

    let codes = registry.list_unique_codes().await.unwrap();
    assert_eq!(codes.len(), 2);
    assert!(codes.contains("QU001"));
    assert!(codes.contains("QU002"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_profile_image(pool: PgPool) {
    let registry = PgRegistry::new(pool);
    let created = registry
        .create_participant(&new_participant("Asha Menon", 1, "QU001"))
        .await
        .unwrap();
    assert!(created.profile_image.is_none());

    let updated = registry
        .update_participant(
            created.id,
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
    assert_eq!(updated.unique_code, created.unique_code);
    assert!(updated.updated_at >= created.updated_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_resolve_participant_with_team(pool: PgPool) {
    let registry = PgRegistry::new(pool);
    let created = registry
        .create_participant(&new_participant("Asha Menon", 3, "PU001"))
        .await
        .unwrap();

    let joined = registry
        .resolve_participant_with_team(created.id)
        .await
        .unwrap();
    assert_eq!(joined.team.code, "PU");
    assert_eq!(joined.participant.full_name, "Asha Menon");

    let err = registry
        .resolve_participant_with_team(999_999)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RegistryError::NotFound {
            entity: "Participant",
            ..
        }
    ));
}

// ---------------------------------------------------------------------------
// Registrations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_registration_pair_is_unique(pool: PgPool) {
    let registry = PgRegistry::new(pool);
    let p = registry
        .create_participant(&new_participant("Asha Menon", 1, "QU001"))
        .await
        .unwrap();

    registry
        .create_registration(&new_registration(p.id, 1))
        .await
        .unwrap();
    let err = registry
        .create_registration(&new_registration(p.id, 1))
        .await
        .unwrap_err();
    assert!(err.is_unique_violation(UQ_REGISTRATION_PAIR));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_registrations_with_details_and_delete(pool: PgPool) {
    let registry = PgRegistry::new(pool);
    let p = registry
        .create_participant(&new_participant("Asha Menon", 2, "NE001"))
        .await
        .unwrap();
    let first = registry
        .create_registration(&new_registration(p.id, 1))
        .await
        .unwrap();
    registry
        .create_registration(&new_registration(p.id, 5))
        .await
        .unwrap();

    let rows = registry
        .resolve_registrations_with_details(&RegistrationFilter {
            participant_id: Some(p.id),
            program_id: None,
        })
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].participant.team.code, "NE");
    assert_eq!(rows[0].program.name, "Classical Dance");
    assert_eq!(rows[1].program.program_type, ProgramType::NonStage);

    assert!(registry.delete_registration(first.id).await.unwrap());
    assert!(!registry.delete_registration(first.id).await.unwrap());

    let remaining = registry.list_registrations(p.id).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].program_id, 5);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_enroll_skips_existing_pairs(pool: PgPool) {
    let registry = PgRegistry::new(pool);
    let p = registry
        .create_participant(&new_participant("Asha Menon", 1, "QU001"))
        .await
        .unwrap();
    registry
        .create_registration(&new_registration(p.id, 2))
        .await
        .unwrap();

    let inserted = registry
        .enroll(&CreateEnrollment {
            participant_id: p.id,
            profile_image: Some("https://img.example/asha.png".into()),
            program_ids: vec![1, 2, 3],
        })
        .await
        .unwrap();
    assert_eq!(inserted, 2);
    assert_eq!(registry.list_registrations(p.id).await.unwrap().len(), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_failed_enroll_rolls_back_every_write(pool: PgPool) {
    let registry = PgRegistry::new(pool);
    let p = registry
        .create_participant(&new_participant("Asha Menon", 1, "QU001"))
        .await
        .unwrap();

    // Program 999 violates the foreign key after program 1 was inserted.
    let err = registry
        .enroll(&CreateEnrollment {
            participant_id: p.id,
            profile_image: Some("https://img.example/asha.png".into()),
            program_ids: vec![1, 999],
        })
        .await
        .unwrap_err();
    assert!(matches!(err, RegistryError::Database(_)));

    assert!(registry.list_registrations(p.id).await.unwrap().is_empty());
    let stored = registry.find_participant(p.id).await.unwrap().unwrap();
    assert!(stored.profile_image.is_none());

    let err = registry
        .enroll(&CreateEnrollment {
            participant_id: 999_999,
            profile_image: None,
            program_ids: vec![1],
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RegistryError::NotFound {
            entity: "Participant",
            ..
        }
    ));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_count_by_program_includes_empty_programs(pool: PgPool) {
    let registry = PgRegistry::new(pool);
    let a = registry
        .create_participant(&new_participant("Asha Menon", 1, "QU001"))
        .await
        .unwrap();
    let b = registry
        .create_participant(&new_participant("Ben Okafor", 2, "NE001"))
        .await
        .unwrap();
    for (pid, prog) in [(a.id, 2), (b.id, 2), (b.id, 7)] {
        registry
            .create_registration(&new_registration(pid, prog))
            .await
            .unwrap();
    }

    let counts = registry.count_registrations_by_program().await.unwrap();
    assert_eq!(counts.len(), seed::PROGRAMS.len());
    let by_id: Vec<(i64, i64)> = counts
        .iter()
        .map(|c| (c.program.id, c.registration_count))
        .collect();
    assert_eq!(
        by_id,
        vec![(1, 0), (2, 2), (3, 0), (4, 0), (5, 0), (6, 0), (7, 1)]
    );
}
