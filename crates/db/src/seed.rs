//! Seed teams and programs.
//!
//! Mirrors the inserts in `db/migrations/20250101000002_seed_data.sql`; the
//! PostgreSQL test suite checks the two stay in step.

use fest_core::program::{ParticipationType, ProgramType};

use crate::models::program::CreateProgram;
use crate::models::team::CreateTeam;

/// `(name, code)` for every seeded team, in id order.
pub const TEAMS: &[(&str, &str)] = &[
    ("Quasar", "QU"),
    ("Nebula", "NE"),
    ("Pulsar", "PU"),
    ("Zenith", "ZE"),
];

/// `(name, program_type, participation_type, description)` for every seeded
/// program, in id order.
pub const PROGRAMS: &[(&str, ProgramType, ParticipationType, &str)] = &[
    (
        "Classical Dance",
        ProgramType::Stage,
        ParticipationType::Individual,
        "Solo classical dance, six minutes",
    ),
    (
        "Group Song",
        ProgramType::Stage,
        ParticipationType::Group,
        "Choir of up to eight voices",
    ),
    (
        "Elocution",
        ProgramType::Stage,
        ParticipationType::Individual,
        "Five minute speech on a topic given on the day",
    ),
    (
        "Drama",
        ProgramType::Stage,
        ParticipationType::Group,
        "One act play, twenty minutes",
    ),
    (
        "Essay Writing",
        ProgramType::NonStage,
        ParticipationType::Individual,
        "Ninety minute written essay",
    ),
    (
        "Pencil Drawing",
        ProgramType::NonStage,
        ParticipationType::Individual,
        "Two hour drawing on a given theme",
    ),
    (
        "Quiz",
        ProgramType::NonStage,
        ParticipationType::Group,
        "Teams of three, written prelims then a stage final",
    ),
];

/// Create DTOs for the seeded teams.
pub fn teams() -> Vec<CreateTeam> {
    TEAMS
        .iter()
        .map(|(name, code)| CreateTeam {
            name: name.to_string(),
            code: code.to_string(),
        })
        .collect()
}

/// Create DTOs for the seeded programs.
pub fn programs() -> Vec<CreateProgram> {
    PROGRAMS
        .iter()
        .map(
            |(name, program_type, participation_type, description)| CreateProgram {
                name: name.to_string(),
                program_type: *program_type,
                participation_type: *participation_type,
                description: Some(description.to_string()),
            },
        )
        .collect()
}
