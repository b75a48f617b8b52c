//! File-system persistence for naming records and settings.

mod naming_repository;
mod settings_repository;

pub use naming_repository::FileNamingRepository;
pub use settings_repository::{SettingsError, SettingsRepository};
