use anyhow::{Context, Result};
use nomen_application::variable_resolver::VariableResolver;
use nomen_domain::{ResolvedOutput, Scope, ServiceSettings};

use crate::args::{ScopeArg, VariableArg};
use crate::output;

/// Resolve an ad hoc template against scope files.
///
/// Scopes apply outermost first; `--var` values form a final `request` scope.
pub async fn run(
    settings: &ServiceSettings,
    template: &str,
    scope_args: &[ScopeArg],
    variables: Vec<VariableArg>,
    json: bool,
) -> Result<()> {
    let mut scopes = super::load_scopes(scope_args).await?;
    if !variables.is_empty() {
        let request = Scope::request(super::variable_map(variables));
        request.validate().context("request variables")?;
        scopes.push(request);
    }

    let resolved = VariableResolver::new(settings.unresolved_policy)
        .resolve(template, &scopes)
        .with_context(|| format!("resolving '{template}'"))?;

    if json {
        output::print_json(&resolved)
    } else {
        print_resolved(&resolved);
        Ok(())
    }
}

fn print_resolved(resolved: &ResolvedOutput) {
    output::print_value(&resolved.value);
    if !resolved.is_complete() {
        let names: Vec<&str> = resolved.unresolved.iter().map(String::as_str).collect();
        output::print_warning(&format!("unresolved placeholders: {}", names.join(", ")));
    }
}
