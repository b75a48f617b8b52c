use anyhow::{Context, Result};
use nomen_application::use_cases::ResolveResource;
use nomen_domain::ServiceSettings;
use nomen_infrastructure::FileNamingRepository;

use crate::output;

/// Resolve a namespace's resource from the record store.
pub async fn run(
    settings: &ServiceSettings,
    namespace_id: &str,
    resource_name: &str,
    json: bool,
) -> Result<()> {
    let repository = FileNamingRepository::new(&settings.store_root);
    let resolved = ResolveResource::new(repository, settings.unresolved_policy)
        .execute(namespace_id, resource_name)
        .await
        .with_context(|| format!("resolving '{resource_name}' in namespace '{namespace_id}'"))?;

    if json {
        return output::print_json(&resolved.resource);
    }

    output::print_value(&resolved.resource.value);
    if !resolved.resource.unresolved.is_empty() {
        let names: Vec<&str> = resolved
            .resource
            .unresolved
            .iter()
            .map(String::as_str)
            .collect();
        output::print_warning(&format!(
            "unresolved placeholders in namespace '{}': {}",
            resolved.namespace.name,
            names.join(", ")
        ));
    }
    Ok(())
}
