//! Festival registration domain logic.
//!
//! Pure, storage-agnostic building blocks shared by the `db`,
//! `registration` and `api` crates.

pub mod error;
pub mod export;
pub mod program;
pub mod registration;
pub mod types;
pub mod unique_code;
