//! Array elements of a stored JSON file
//!
//! Read-modify-write cycles parse each element on its own; whatever does not
//! parse is carried through as raw JSON so a rewrite never loses it.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

/// One stored array element
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(crate) enum Entry<T> {
    Record(T),
    /// Kept verbatim
    Unreadable(Value),
}

impl<T: DeserializeOwned> Entry<T> {
    /// Parse one element of `file`; elements without a string id stay raw
    pub(crate) fn parse(item: Value, file: &str) -> Self {
        let Some(id) = item.get("id").and_then(Value::as_str).map(str::to_string) else {
            warn!(file, "Skipping entry without an id");
            return Self::Unreadable(item);
        };
        match serde_json::from_value(item.clone()) {
            Ok(record) => Self::Record(record),
            Err(e) => {
                warn!(file, %id, error = %e, "Skipping malformed entry");
                Self::Unreadable(item)
            }
        }
    }
}

impl<T> Entry<T> {
    pub(crate) fn record(&self) -> Option<&T> {
        match self {
            Self::Record(record) => Some(record),
            Self::Unreadable(_) => None,
        }
    }

    pub(crate) fn into_record(self) -> Option<T> {
        match self {
            Self::Record(record) => Some(record),
            Self::Unreadable(_) => None,
        }
    }
}
