//! Participant code generator.
//!
//! A code is the team prefix followed by a zero-padded sequence number,
//! e.g. `QU001`. The first sequence number not already taken wins.

use std::collections::HashSet;

/// Minimum width of the numeric part of a code.
pub const SEQUENCE_WIDTH: usize = 3;

/// Format the candidate code for a prefix and sequence number.
///
/// Sequences wider than [`SEQUENCE_WIDTH`] digits are not truncated.
pub fn format_code(team_prefix: &str, sequence: u32) -> String {
    format!("{team_prefix}{sequence:0width$}", width = SEQUENCE_WIDTH)
}

/// Return the first free code for `team_prefix` given the currently known
/// codes.
///
/// Deterministic for a given snapshot of `existing_codes`. The caller is
/// responsible for serializing issuance so the snapshot does not go stale
/// before the new code is persisted.
///
/// # Examples
///
/// ```
/// use std::collections::HashSet;
/// use fest_core::unique_code::generate;
///
/// assert_eq!(generate("QU", &HashSet::new()), "QU001");
///
/// let taken: HashSet<String> = ["QU001".to_string()].into();
/// assert_eq!(generate("QU", &taken), "QU002");
/// ```
pub fn generate(team_prefix: &str, existing_codes: &HashSet<String>) -> String {
    let mut sequence: u32 = 1;
    loop {
        let candidate = format_code(team_prefix, sequence);
        if !existing_codes.contains(&candidate) {
            return candidate;
        }
        sequence += 1;
    }
}
