use std::collections::BTreeMap;

use anyhow::{Context, Result};
use nomen_application::variable_resolver::{ScopeCompositor, VariableResolver};
use nomen_domain::{Environment, ServiceSettings};
use serde_json::json;

use crate::args::ScopeArg;
use crate::output;

/// Print each scope's evaluation order and the values it produces.
///
/// Scopes are resolved in sequence exactly as `resolve` would, so values and
/// leftover placeholders reflect everything the outer scopes provide.
pub async fn run(settings: &ServiceSettings, scope_args: &[ScopeArg], json: bool) -> Result<()> {
    let scopes = super::load_scopes(scope_args).await?;
    ScopeCompositor::new(&scopes).context("checking scope tags")?;

    let resolver = VariableResolver::new(settings.unresolved_policy);
    let mut environment = Environment::new();
    let mut report = Vec::with_capacity(scopes.len());

    for scope in &scopes {
        let resolution = resolver
            .resolve_scope(&environment, scope)
            .with_context(|| format!("planning scope '{}'", scope.tag))?;

        let steps: Vec<_> = resolution
            .order
            .iter()
            .filter_map(|name| resolution.environment.get(name))
            .collect();

        if json {
            let values: BTreeMap<&str, &str> = steps
                .iter()
                .map(|var| (var.name.as_str(), var.value.as_str()))
                .collect();
            report.push(json!({
                "scope": resolution.tag,
                "order": resolution.order,
                "values": values,
                "unresolved": resolution.unresolved(),
            }));
        } else {
            output::print_header(&resolution.tag);
            for var in &steps {
                output::print_key_value(&var.name, &var.value);
            }
            for (name, missing) in resolution.unresolved() {
                let missing: Vec<&str> = missing.iter().map(String::as_str).collect();
                output::print_warning(&format!(
                    "{}.{name} references unknown {}",
                    resolution.tag,
                    missing.join(", ")
                ));
            }
        }

        environment = resolution.environment;
    }

    if json {
        output::print_json(&report)?;
    }
    Ok(())
}
