use anyhow::{Context, Result};
use nomen_application::use_cases::ResolveSchemaResource;
use nomen_domain::ServiceSettings;
use nomen_infrastructure::FileNamingRepository;

use crate::args::VariableArg;
use crate::output;

/// Resolve a schema version's resource against request variables.
pub async fn run(
    settings: &ServiceSettings,
    schema_id: &str,
    version: u32,
    resource_name: &str,
    variables: Vec<VariableArg>,
    json: bool,
) -> Result<()> {
    let repository = FileNamingRepository::new(&settings.store_root);
    let resolved = ResolveSchemaResource::new(repository, settings.unresolved_policy)
        .execute(
            schema_id,
            version,
            resource_name,
            super::variable_map(variables),
        )
        .await
        .with_context(|| {
            format!("resolving '{resource_name}' in schema '{schema_id}' version {version}")
        })?;

    if json {
        return output::print_json(&resolved);
    }

    output::print_value(&resolved.value);
    if !resolved.unresolved.is_empty() {
        let names: Vec<&str> = resolved.unresolved.iter().map(String::as_str).collect();
        output::print_warning(&format!("unresolved placeholders: {}", names.join(", ")));
    }
    Ok(())
}
