//! Registration request DTOs and the pure pieces of the two-step workflow.
//!
//! Step one (`IssueCodeRequest`) turns a name and team into a participant
//! code. Step two (`RegisterProgramsRequest`) enrolls the holder of a code in
//! a list of programs.

use std::collections::HashSet;

use serde::Deserialize;
use validator::Validate;

use crate::error::CoreError;
use crate::types::DbId;

/// Shortest accepted full name, in characters.
pub const MIN_FULL_NAME_CHARS: usize = 2;

/// Longest accepted full name, in characters.
pub const MAX_FULL_NAME_CHARS: usize = 100;

/// Longest accepted profile image URL.
pub const MAX_PROFILE_IMAGE_CHARS: usize = 2048;

/// Step one input: who is registering and for which team.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct IssueCodeRequest {
    #[validate(length(
        min = 2,
        max = 100,
        message = "Full name must be between 2 and 100 characters"
    ))]
    pub full_name: String,
    pub team_id: DbId,
}

impl IssueCodeRequest {
    /// Trim the name and validate the request.
    pub fn normalized(&self) -> Result<Self, CoreError> {
        let request = Self {
            full_name: self.full_name.trim().to_string(),
            team_id: self.team_id,
        };
        request.validate()?;
        Ok(request)
    }
}

/// Step two input: a previously issued code and the programs to enter.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterProgramsRequest {
    pub unique_code: String,
    #[validate(length(min = 1, message = "Select at least one program"))]
    pub program_ids: Vec<DbId>,
    /// URL of an already uploaded profile image.
    #[validate(length(max = 2048, message = "Profile image URL is too long"))]
    pub profile_image: Option<String>,
}

impl RegisterProgramsRequest {
    /// Trim the code, drop a blank image URL, and validate the request.
    pub fn normalized(&self) -> Result<Self, CoreError> {
        let request = Self {
            unique_code: self.unique_code.trim().to_string(),
            program_ids: self.program_ids.clone(),
            profile_image: normalize_profile_image(self.profile_image.as_deref()),
        };
        request.validate()?;
        Ok(request)
    }
}

/// Body of a standalone profile image update.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileImageRequest {
    pub profile_image: Option<String>,
}

/// Trim an optional profile image URL, mapping blank input to `None`.
pub fn normalize_profile_image(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Validate a standalone profile image URL.
pub fn validate_profile_image(url: &str) -> Result<(), CoreError> {
    if url.chars().count() > MAX_PROFILE_IMAGE_CHARS {
        return Err(CoreError::Validation(
            "Profile image URL is too long".to_string(),
        ));
    }
    Ok(())
}

/// Case-insensitive comparison key for participant names.
pub fn name_key(full_name: &str) -> String {
    full_name.trim().to_lowercase()
}

/// Programs from `requested` that are not in `already_registered`.
///
/// Order of first appearance is kept and repeated ids collapse to one.
pub fn programs_to_add(requested: &[DbId], already_registered: &HashSet<DbId>) -> Vec<DbId> {
    let mut seen = HashSet::with_capacity(requested.len());
    requested
        .iter()
        .copied()
        .filter(|id| !already_registered.contains(id) && seen.insert(*id))
        .collect()
}
