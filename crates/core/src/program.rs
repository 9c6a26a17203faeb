//! Program classification enums.
//!
//! Stored as lowercase TEXT columns (`stage`, `non-stage`, `group`,
//! `individual`) guarded by CHECK constraints in the schema.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Whether a program is performed on stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProgramType {
    #[serde(rename = "stage")]
    Stage,
    #[serde(rename = "non-stage")]
    NonStage,
}

impl ProgramType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stage => "stage",
            Self::NonStage => "non-stage",
        }
    }
}

/// Whether a program is entered by a group or a single person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipationType {
    Group,
    Individual,
}

impl ParticipationType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Group => "group",
            Self::Individual => "individual",
        }
    }
}

impl FromStr for ProgramType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stage" => Ok(Self::Stage),
            "non-stage" => Ok(Self::NonStage),
            other => Err(CoreError::Validation(format!(
                "Invalid program type '{other}'. Must be one of: stage, non-stage"
            ))),
        }
    }
}

impl FromStr for ParticipationType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "group" => Ok(Self::Group),
            "individual" => Ok(Self::Individual),
            other => Err(CoreError::Validation(format!(
                "Invalid participation type '{other}'. Must be one of: group, individual"
            ))),
        }
    }
}

// Row decoding goes through `String` (`#[sqlx(try_from = "String")]`).
impl TryFrom<String> for ProgramType {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for ParticipationType {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for ProgramType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ParticipationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
