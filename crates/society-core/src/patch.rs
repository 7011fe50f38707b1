//! Patch merging for updates
//!
//! Updates are JSON objects merged over the stored record. Immutable keys are
//! dropped from the patch, `updatedAt` is stamped, and the result must
//! deserialize back into the typed record (so unknown status strings and
//! wrongly typed fields are rejected here).

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::DomainError;
use crate::traits::Record;

/// Fields a patch can never change
pub const IMMUTABLE_FIELDS: [&str; 3] = ["id", "createdAt", "createdBy"];

/// Fields the store manages itself and callers cannot set through a patch
const MANAGED_FIELDS: [&str; 2] = ["updatedAt", "archivedAt"];

/// Merge `patch` over `existing` and stamp `updatedAt`.
pub fn merge_record<T: Record>(
    existing: &T,
    patch: &Map<String, Value>,
    now: DateTime<Utc>,
) -> Result<T, DomainError> {
    let mut merged = to_object(existing)?;

    for (key, value) in patch {
        if IMMUTABLE_FIELDS.contains(&key.as_str()) || MANAGED_FIELDS.contains(&key.as_str()) {
            continue;
        }
        merged.insert(key.clone(), value.clone());
    }
    merged.insert("updatedAt".to_string(), timestamp(now));

    serde_json::from_value(Value::Object(merged)).map_err(|e| {
        DomainError::validation(format!("Invalid {} update: {e}", T::KIND))
    })
}

/// Recursively merge `patch` into a singleton document.
///
/// Nested objects are merged key by key; any other value replaces the
/// stored one. `updatedAt` / `updatedBy` are stamped on the root.
pub fn merge_document<T>(
    existing: &T,
    patch: &Map<String, Value>,
    now: DateTime<Utc>,
    updated_by: &str,
) -> Result<T, DomainError>
where
    T: Serialize + DeserializeOwned,
{
    let mut merged = Value::Object(to_object(existing)?);
    deep_merge(&mut merged, &Value::Object(patch.clone()));

    if let Value::Object(root) = &mut merged {
        root.insert("updatedAt".to_string(), timestamp(now));
        root.insert("updatedBy".to_string(), Value::String(updated_by.to_string()));
    }

    serde_json::from_value(merged).map_err(|e| DomainError::validation(format!("Invalid update: {e}")))
}

fn deep_merge(target: &mut Value, patch: &Value) {
    match (target, patch) {
        (Value::Object(target), Value::Object(patch)) => {
            for (key, value) in patch {
                match target.get_mut(key) {
                    Some(existing) if existing.is_object() && value.is_object() => {
                        deep_merge(existing, value);
                    }
                    _ => {
                        target.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (target, patch) => *target = patch.clone(),
    }
}

fn to_object<T: Serialize>(value: &T) -> Result<Map<String, Value>, DomainError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(DomainError::InternalError(
            "record did not serialize to an object".to_string(),
        )),
        Err(e) => Err(DomainError::InternalError(e.to_string())),
    }
}

fn timestamp(now: DateTime<Utc>) -> Value {
    serde_json::to_value(now).unwrap_or(Value::Null)
}
