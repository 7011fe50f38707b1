//! Record identifiers
//!
//! Ids have the form `<PREFIX>-<yyyyMMddHHmmss>` where the timestamp is the
//! UTC creation second. They are opaque once assigned.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";
const TIMESTAMP_LEN: usize = 14;

/// Stable identifier of a persisted record
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Wrap an existing id string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate an id for the given prefix and creation time
    pub fn generate(prefix: &str, at: DateTime<Utc>) -> Self {
        Self(format!("{prefix}-{}", at.format(TIMESTAMP_FORMAT)))
    }

    /// Generate the first id for `prefix` at or after `at` that `taken` rejects.
    ///
    /// Collisions move the timestamp forward one second at a time.
    pub fn generate_unique(prefix: &str, at: DateTime<Utc>, taken: impl Fn(&str) -> bool) -> Self {
        let mut candidate_at = at;
        loop {
            let candidate = Self::generate(prefix, candidate_at);
            if !taken(candidate.as_str()) {
                return candidate;
            }
            candidate_at += Duration::seconds(1);
        }
    }

    /// Borrow the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Whether this id follows the `<PREFIX>-<14 digits>` format
    pub fn matches_format(&self, prefix: &str) -> bool {
        self.0
            .strip_prefix(prefix)
            .and_then(|rest| rest.strip_prefix('-'))
            .is_some_and(|digits| {
                digits.len() == TIMESTAMP_LEN && digits.bytes().all(|b| b.is_ascii_digit())
            })
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 2).unwrap()
    }

    #[test]
    fn test_generate_format() {
        let id = RecordId::generate("NOT", fixed_time());
        assert_eq!(id.as_str(), "NOT-20240309070502");
        assert!(id.matches_format("NOT"));
        assert!(!id.matches_format("DOC"));
    }

    #[test]
    fn test_matches_format_rejects_bad_ids() {
        assert!(!RecordId::new("NOT-2024").matches_format("NOT"));
        assert!(!RecordId::new("NOT20240309070502").matches_format("NOT"));
        assert!(!RecordId::new("NOT-2024030907050x").matches_format("NOT"));
    }

    #[test]
    fn test_generate_unique_skips_taken_seconds() {
        let taken = ["EVT-20240309070502", "EVT-20240309070503"];
        let id = RecordId::generate_unique("EVT", fixed_time(), |candidate| {
            taken.contains(&candidate)
        });
        assert_eq!(id.as_str(), "EVT-20240309070504");
    }

    #[test]
    fn test_serde_transparent() {
        let id = RecordId::new("GAL-20240309070502");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"GAL-20240309070502\"");
    }
}
