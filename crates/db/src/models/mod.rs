//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - Joined read models where the API needs related rows together

pub mod participant;
pub mod program;
pub mod registration;
pub mod team;
