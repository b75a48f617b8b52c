//! Deterministic serialization for Nomen record files.
//!
//! Records are written as JSON with sorted keys (via `BTreeMap` in domain
//! types), 2-space indentation and a trailing newline. Documents written by
//! hand, such as settings and scope files, may also be YAML.

mod json;
mod yaml;

use std::path::Path;

pub use json::*;
pub use yaml::*;

use serde::de::DeserializeOwned;

/// Document formats accepted for hand-written files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// JSON (`.json` and anything unrecognised).
    Json,
    /// YAML (`.yaml`, `.yml`).
    Yaml,
}

impl DocumentFormat {
    /// Picks the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }

    /// Deserializes a document in this format.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is invalid or doesn't match `T`.
    pub fn decode<T: DeserializeOwned>(self, bytes: &[u8]) -> Result<T, SerializationError> {
        match self {
            Self::Json => from_json_bytes(bytes),
            Self::Yaml => from_yaml_bytes(bytes),
        }
    }
}
