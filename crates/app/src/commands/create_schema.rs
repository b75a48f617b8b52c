use anyhow::{Context, Result};
use nomen_application::use_cases::CreateSchema;
use nomen_domain::ServiceSettings;
use nomen_infrastructure::FileNamingRepository;
use serde_json::json;

use crate::output;

/// Register a schema and its first version in the record store.
pub async fn run(
    settings: &ServiceSettings,
    organization_id: &str,
    name: &str,
    json: bool,
) -> Result<()> {
    let repository = FileNamingRepository::new(&settings.store_root);
    let created = CreateSchema::new(repository)
        .execute(organization_id, name)
        .await
        .with_context(|| format!("creating schema '{name}'"))?;

    if json {
        return output::print_json(&json!({
            "schema": created.schema,
            "version": created.version,
        }));
    }

    output::print_value(&created.schema.id);
    Ok(())
}
