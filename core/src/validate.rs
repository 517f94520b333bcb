//! Pre-flight argument checks.
//!
//! The type check and the required-key difference are pure. Fetching the
//! required keys is a network call and lives on `PassClient`; only the set
//! arithmetic is here.

use std::collections::BTreeSet;

use crate::error::PassNinjaError;
use crate::types::ClientPassData;

/// Entries of `data` whose value is not a JSON string.
pub fn invalid_entries(data: &ClientPassData) -> ClientPassData {
    data.iter()
        .filter(|(_, value)| !value.is_string())
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Required keys that `data` does not supply.
pub fn missing_required_keys(required: &BTreeSet<String>, data: &ClientPassData) -> BTreeSet<String> {
    required
        .iter()
        .filter(|key| !data.contains_key(key.as_str()))
        .cloned()
        .collect()
}

/// Reject an empty identifier. `what` names the argument in the message.
pub(crate) fn require_present(value: &str, what: &str, method: &str) -> Result<(), PassNinjaError> {
    if value.is_empty() {
        return Err(PassNinjaError::invalid(format!(
            "Must provide {what} to PassClient.{method} method."
        )));
    }
    Ok(())
}

/// Reject client pass data carrying any non-string value.
pub(crate) fn require_string_values(data: &ClientPassData) -> Result<(), PassNinjaError> {
    let invalid = invalid_entries(data);
    if invalid.is_empty() {
        return Ok(());
    }
    Err(PassNinjaError::invalid(format!(
        "Invalid templateStrings provided in clientPassData object. Invalid keys: {}",
        serde_json::Value::Object(invalid)
    )))
}

/// Reject client pass data that leaves any required key unset.
pub(crate) fn require_keys(required: &BTreeSet<String>, data: &ClientPassData) -> Result<(), PassNinjaError> {
    let missing = missing_required_keys(required, data);
    if missing.is_empty() {
        return Ok(());
    }
    let list: Vec<&str> = missing.iter().map(String::as_str).collect();
    Err(PassNinjaError::invalid(format!(
        "Some keys that are required for this passType are missing on the provided clientPassData object. Missing keys: {}",
        list.join(", ")
    )))
}
