//! CLI command implementations for nomen.
//!
//! Each module corresponds to a subcommand (`nomen <command>`).

pub mod create_schema;
pub mod plan;
pub mod resolve;
pub mod resource;
pub mod schema;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use nomen_domain::{Scope, ServiceSettings, UnresolvedPolicy, VariableMap};
use nomen_infrastructure::{DocumentFormat, SettingsRepository};
use tracing::debug;

use crate::args::{ScopeArg, VariableArg};

/// Loads the settings file and applies command-line overrides.
pub async fn load_settings(
    config_path: &Path,
    store: Option<PathBuf>,
    policy: Option<UnresolvedPolicy>,
) -> Result<ServiceSettings> {
    let mut settings = SettingsRepository::new()
        .load(config_path)
        .await
        .with_context(|| format!("loading settings from {}", config_path.display()))?;

    if let Some(store) = store {
        settings = settings.with_store_root(store);
    }
    if let Some(policy) = policy {
        settings = settings.with_policy(policy);
    }

    debug!(
        store = %settings.store_root.display(),
        policy = %settings.unresolved_policy,
        "settings loaded"
    );
    Ok(settings)
}

/// Reads the variables of each `--scope` file, keeping the given order.
pub async fn load_scopes(args: &[ScopeArg]) -> Result<Vec<Scope>> {
    let mut scopes = Vec::with_capacity(args.len());
    for arg in args {
        let content = tokio::fs::read(&arg.path)
            .await
            .with_context(|| format!("reading scope file {}", arg.path.display()))?;
        let variables: VariableMap = DocumentFormat::from_path(&arg.path)
            .decode(&content)
            .with_context(|| format!("parsing scope file {}", arg.path.display()))?;

        let scope = Scope::from_variables(arg.tag.as_str(), variables);
        scope
            .validate()
            .with_context(|| format!("scope '{}' in {}", arg.tag, arg.path.display()))?;
        scopes.push(scope);
    }
    Ok(scopes)
}

/// Collects `--var` arguments into a variable map. Later names win.
pub fn variable_map(args: Vec<VariableArg>) -> VariableMap {
    args.into_iter()
        .map(|arg| (arg.name, arg.template))
        .collect()
}
