//! End-to-end tests of the `nomen` binary.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::path::Path;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use tempfile::{TempDir, tempdir};

use nomen_application::ports::NamingRepository;
use nomen_domain::{Namespace, Organization, SchemaVersion};
use nomen_infrastructure::FileNamingRepository;

/// Runs `nomen` with settings isolated to `dir`.
fn nomen(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_nomen"))
        .current_dir(dir)
        .env_remove("NOMEN_CONFIG")
        .env_remove("NOMEN_STORE")
        .env_remove("NOMEN_POLICY")
        .args(args)
        .output()
        .expect("Failed to run nomen")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("utf-8 stdout")
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).expect("utf-8 stderr")
}

fn scope_files() -> TempDir {
    let dir = tempdir().expect("Failed to create temp directory");
    std::fs::write(
        dir.path().join("org.json"),
        r#"{"env": "prod", "region": "weu"}"#,
    )
    .expect("write org");
    std::fs::write(
        dir.path().join("ns.yaml"),
        "host: \"{env}-db\"\nname: \"{host}-{region}\"\n",
    )
    .expect("write namespace");
    dir
}

#[test]
fn test_resolve_against_scope_files() {
    let dir = scope_files();
    let output = nomen(
        dir.path(),
        &[
            "resolve",
            "{name}-01",
            "--scope",
            "organization=org.json",
            "--scope",
            "namespace=ns.yaml",
        ],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "prod-db-weu-01\n");
}

#[test]
fn test_request_variables_override_scopes() {
    let dir = scope_files();
    let output = nomen(
        dir.path(),
        &[
            "resolve",
            "{env}-{suffix}",
            "--scope",
            "organization=org.json",
            "--var",
            "env=test",
            "--var",
            "suffix={region}",
        ],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "test-weu\n");
}

#[test]
fn test_unresolved_placeholders_follow_policy() {
    let dir = scope_files();
    let args = ["resolve", "{env}-{shard}", "--scope", "organization=org.json"];

    let output = nomen(dir.path(), &args);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "prod-{shard}\n");
    assert!(stderr(&output).contains("shard"));

    let mut strict = args.to_vec();
    strict.extend(["--policy", "error"]);
    let output = nomen(dir.path(), &strict);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("unresolved placeholders: shard"));
}

#[test]
fn test_policy_from_settings_file() {
    let dir = scope_files();
    std::fs::write(dir.path().join("nomen.yaml"), "unresolved_policy: error\n")
        .expect("write settings");

    let output = nomen(
        dir.path(),
        &[
            "--config",
            "nomen.yaml",
            "resolve",
            "{missing}",
            "--scope",
            "organization=org.json",
        ],
    );
    assert!(!output.status.success());
}

#[test]
fn test_duplicate_scope_tags_fail() {
    let dir = scope_files();
    let output = nomen(
        dir.path(),
        &[
            "resolve",
            "{env}",
            "--scope",
            "organization=org.json",
            "--scope",
            "organization=ns.yaml",
        ],
    );

    assert!(!output.status.success());
    assert!(stderr(&output).contains("duplicate scope: organization"));
}

#[test]
fn test_cycle_reports_members() {
    let dir = tempdir().expect("Failed to create temp directory");
    std::fs::write(dir.path().join("cycle.json"), r#"{"a": "{b}", "b": "{a}"}"#)
        .expect("write scope");

    let output = nomen(dir.path(), &["plan", "--scope", "custom=cycle.json"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("cyclic reference in scope 'custom': a -> b"));
}

#[test]
fn test_plan_json_reports_order() {
    let dir = scope_files();
    let output = nomen(
        dir.path(),
        &[
            "--json",
            "plan",
            "--scope",
            "organization=org.json",
            "--scope",
            "namespace=ns.yaml",
        ],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("json");
    assert_eq!(report[0]["scope"], "organization");
    assert_eq!(report[1]["order"], serde_json::json!(["host", "name"]));
    assert_eq!(report[1]["values"]["name"], "prod-db-weu");
}

#[tokio::test]
async fn test_resource_and_schema_commands_read_the_store() {
    let dir = tempdir().expect("Failed to create temp directory");
    let store = dir.path().join("store");
    let repo = FileNamingRepository::new(&store);

    let organization = Organization::new("acme").with_variable("env", "prod");
    let namespace = Namespace::new(&organization.id, "payments", "azure", 1)
        .with_variable("region", "weu");
    let version = SchemaVersion::new("azure", 1).with_resource("storage_account", "{env}{region}sa");
    repo.save_organization(&organization).await.expect("save organization");
    repo.save_namespace(&namespace).await.expect("save namespace");
    repo.save_schema_version(&version).await.expect("save version");

    let output = nomen(
        dir.path(),
        &["--store", "store", "resource", &namespace.id, "storage_account"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "prodweusa\n");

    let output = nomen(
        dir.path(),
        &[
            "--store",
            "store",
            "--json",
            "schema",
            "azure",
            "1",
            "storage_account",
            "--var",
            "env=dev",
            "--var",
            "region=neu",
        ],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let resolved: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("json");
    assert_eq!(resolved["value"], "devneusa");

    let output = nomen(
        dir.path(),
        &["--store", "store", "resource", "missing", "storage_account"],
    );
    assert!(!output.status.success());
    assert!(stderr(&output).contains("namespace"));
}

#[tokio::test]
async fn test_create_schema_writes_first_version() {
    let dir = tempdir().expect("Failed to create temp directory");
    let store = dir.path().join("store");
    let organization = Organization::new("acme");
    FileNamingRepository::new(&store)
        .save_organization(&organization)
        .await
        .expect("save organization");

    let output = nomen(
        dir.path(),
        &["--store", "store", "create-schema", &organization.id, "azure"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let schema_id = stdout(&output).trim().to_string();
    assert!(store.join("schemas").join(&schema_id).join("schema.json").is_file());
    assert!(store.join("schemas").join(&schema_id).join("versions/1.json").is_file());

    let output = nomen(dir.path(), &["--store", "store", "create-schema", "missing", "azure"]);
    assert!(!output.status.success());
}
