//! JSON serialization helpers for deterministic output.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::io;

/// Error type for serialization operations.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// JSON deserialization failed.
    #[error("JSON deserialization failed: {0}")]
    Deserialize(serde_json::Error),

    /// YAML deserialization failed.
    #[error("YAML deserialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Serializes a value to deterministic JSON.
///
/// Output format:
/// - 2-space indentation
/// - Trailing newline
/// - Keys sorted alphabetically (requires `BTreeMap` in source types)
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_stable<T: Serialize>(value: &T) -> Result<String, SerializationError> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;

    let mut json = String::from_utf8(buffer)?;
    json.push('\n');
    Ok(json)
}

/// Serializes a value to deterministic JSON bytes for direct file writing.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_stable_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, SerializationError> {
    let json = to_json_stable(value)?;
    Ok(json.into_bytes())
}

/// Deserializes JSON from bytes.
///
/// # Errors
///
/// Returns an error if the JSON is invalid or doesn't match the expected type.
pub fn from_json_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SerializationError> {
    serde_json::from_slice(bytes).map_err(SerializationError::Deserialize)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use nomen_domain::Organization;

    fn organization() -> Organization {
        Organization {
            id: "org-1".to_string(),
            name: "acme".to_string(),
            variables: Default::default(),
        }
        .with_variable("zone", "3")
        .with_variable("env", "prod")
    }

    #[test]
    fn test_stable_output_format() {
        let json = to_json_stable(&organization()).expect("serialization should work");
        assert!(json.ends_with("}\n"));
        assert!(json.contains("\n  \"id\": \"org-1\""));
    }

    #[test]
    fn test_variables_written_in_name_order() {
        let json = to_json_stable(&organization()).expect("serialization should work");
        let env_pos = json.find("\"env\"").expect("env should be in json");
        let zone_pos = json.find("\"zone\"").expect("zone should be in json");
        assert!(env_pos < zone_pos);
    }

    #[test]
    fn test_bytes_parse_back() {
        let bytes = to_json_stable_bytes(&organization()).expect("serialization should work");
        let restored: Organization = from_json_bytes(&bytes).expect("deserialization should work");
        assert_eq!(restored, organization());
    }

    #[test]
    fn test_invalid_json_is_deserialize_error() {
        let result: Result<Organization, _> = from_json_bytes(br#"{"id": }"#);
        assert!(matches!(result, Err(SerializationError::Deserialize(_))));
    }
}
