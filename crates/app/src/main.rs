//! nomen CLI - resolve resource-naming templates from layered variable scopes.
//!
//! `resolve` and `plan` work on scope files given on the command line;
//! `resource`, `schema` and `create-schema` work on the record store.

mod args;
mod commands;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use nomen_domain::UnresolvedPolicy;

use crate::args::{ScopeArg, VariableArg};

#[derive(Parser)]
#[command(
    name = "nomen",
    about = "Resolve resource names from organization, namespace and request variables",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the settings file (JSON, or YAML by extension)
    #[arg(long, global = true, env = "NOMEN_CONFIG", default_value = "nomen.json")]
    config: PathBuf,

    /// Record store root (overrides the settings file)
    #[arg(long, global = true, env = "NOMEN_STORE")]
    store: Option<PathBuf>,

    /// What to do with placeholders nothing resolves (overrides the settings file)
    #[arg(long, global = true, env = "NOMEN_POLICY", value_enum)]
    policy: Option<PolicyChoice>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a template against scope files
    Resolve {
        /// Template, e.g. "{env}-{region}-sa"
        template: String,

        /// Scope file as TAG=PATH, outermost first
        #[arg(long = "scope", short = 's')]
        scopes: Vec<ScopeArg>,

        /// Request variable as NAME=TEMPLATE, applied after every scope
        #[arg(long = "var")]
        variables: Vec<VariableArg>,
    },

    /// Resolve a resource of a namespace from the record store
    Resource {
        /// Namespace id
        namespace: String,

        /// Resource name within the namespace's schema version
        resource: String,
    },

    /// Resolve a resource of a schema version from request variables only
    Schema {
        /// Schema id
        schema: String,

        /// Schema version number
        #[arg(value_name = "VERSION")]
        schema_version: u32,

        /// Resource name
        resource: String,

        /// Request variable as NAME=TEMPLATE
        #[arg(long = "var")]
        variables: Vec<VariableArg>,
    },

    /// Register a schema for an organization with an empty first version
    CreateSchema {
        /// Organization id
        organization: String,

        /// Schema name
        name: String,
    },

    /// Print the evaluation order of each scope's variables
    Plan {
        /// Scope file as TAG=PATH, outermost first
        #[arg(long = "scope", short = 's', required = true)]
        scopes: Vec<ScopeArg>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PolicyChoice {
    /// Leave unknown placeholders in the output
    LeaveVerbatim,
    /// Fail when the final name still has placeholders
    Error,
}

impl From<PolicyChoice> for UnresolvedPolicy {
    fn from(choice: PolicyChoice) -> Self {
        match choice {
            PolicyChoice::LeaveVerbatim => Self::LeaveVerbatim,
            PolicyChoice::Error => Self::Error,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let settings =
        commands::load_settings(&cli.config, cli.store, cli.policy.map(Into::into)).await?;

    match cli.command {
        Commands::Resolve {
            template,
            scopes,
            variables,
        } => {
            commands::resolve::run(&settings, &template, &scopes, variables, cli.json).await?;
        }
        Commands::Resource {
            namespace,
            resource,
        } => {
            commands::resource::run(&settings, &namespace, &resource, cli.json).await?;
        }
        Commands::Schema {
            schema,
            schema_version,
            resource,
            variables,
        } => {
            commands::schema::run(
                &settings,
                &schema,
                schema_version,
                &resource,
                variables,
                cli.json,
            )
            .await?;
        }
        Commands::CreateSchema { organization, name } => {
            commands::create_schema::run(&settings, &organization, &name, cli.json).await?;
        }
        Commands::Plan { scopes } => {
            commands::plan::run(&settings, &scopes, cli.json).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_schema_command_takes_a_version_number() {
        let cli = Cli::try_parse_from(["nomen", "schema", "azure", "2", "storage_account"])
            .expect("valid arguments");
        let Commands::Schema {
            schema,
            schema_version,
            resource,
            variables,
        } = cli.command
        else {
            panic!("expected the schema command");
        };

        assert_eq!(schema, "azure");
        assert_eq!(schema_version, 2);
        assert_eq!(resource, "storage_account");
        assert!(variables.is_empty());
    }
}
