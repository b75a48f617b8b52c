//! Service settings file loading.

use std::io::ErrorKind;
use std::path::Path;

use nomen_domain::ServiceSettings;
use tracing::debug;

use crate::serialization::{DocumentFormat, SerializationError};

/// Errors that can occur while loading settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// I/O error.
    #[error("I/O error reading {path}: {source}")]
    Io {
        /// File that could not be read.
        path: String,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The file is not a valid settings document.
    #[error("invalid settings in {path}: {source}")]
    Parse {
        /// File that failed to parse.
        path: String,
        /// Underlying error.
        source: SerializationError,
    },
}

/// Loads [`ServiceSettings`] from JSON or YAML files.
#[derive(Debug, Clone, Copy, Default)]
pub struct SettingsRepository;

impl SettingsRepository {
    /// Creates a settings repository.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Loads settings from `path`, picking the format from its extension.
    ///
    /// A missing file yields the default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load(&self, path: &Path) -> Result<ServiceSettings, SettingsError> {
        let content = match tokio::fs::read(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no settings file, using defaults");
                return Ok(ServiceSettings::default());
            }
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path.display().to_string(),
                    source,
                });
            }
        };

        // An empty YAML document is not a mapping; treat it like a missing file.
        if content.iter().all(u8::is_ascii_whitespace) {
            return Ok(ServiceSettings::default());
        }

        DocumentFormat::from_path(path)
            .decode(&content)
            .map_err(|source| SettingsError::Parse {
                path: path.display().to_string(),
                source,
            })
    }
}
