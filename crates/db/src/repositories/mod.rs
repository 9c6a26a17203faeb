//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod participant_repo;
pub mod program_repo;
pub mod registration_repo;
pub mod team_repo;

pub use participant_repo::ParticipantRepo;
pub use program_repo::ProgramRepo;
pub use registration_repo::RegistrationRepo;
pub use team_repo::TeamRepo;
