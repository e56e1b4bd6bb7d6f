//! Run each sample end to end against the in-process fake registry.

use std::time::Duration;

use assert_matches::assert_matches;
use librarian_registry::testing::FakeRegistry;
use librarian_registry::{RegistryClient, RegistryError};
use librarian_samples::{artifacts, basic, openapi, search, SampleConfig, SampleDefaults, SampleError};
use reqwest::StatusCode;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn config_for(registry: &FakeRegistry, defaults: &SampleDefaults) -> SampleConfig {
    SampleConfig {
        registry_url: registry.base_url().to_string(),
        group_id: defaults.group_id.to_string(),
        artifact_id: defaults.artifact_id.to_string(),
        timeout: Duration::from_secs(5),
    }
}

async fn run_basic(client: &RegistryClient, config: &SampleConfig) -> Result<String, SampleError> {
    let mut out = Vec::new();
    basic::run(client, config, &mut out).await?;
    Ok(String::from_utf8(out).unwrap())
}

async fn run_artifacts(
    client: &RegistryClient,
    config: &SampleConfig,
) -> Result<String, SampleError> {
    let mut out = Vec::new();
    artifacts::run(client, config, &mut out).await?;
    Ok(String::from_utf8(out).unwrap())
}

async fn run_search(client: &RegistryClient, config: &SampleConfig) -> Result<String, SampleError> {
    let mut out = Vec::new();
    search::run(client, config, &mut out).await?;
    Ok(String::from_utf8(out).unwrap())
}

async fn run_openapi(client: &RegistryClient, config: &SampleConfig) -> Result<String, SampleError> {
    let mut out = Vec::new();
    openapi::run(client, config, &mut out).await?;
    Ok(String::from_utf8(out).unwrap())
}

// ---------------------------------------------------------------------------
// Basic
// ---------------------------------------------------------------------------

#[tokio::test]
async fn basic_reports_empty_registry() {
    let registry = FakeRegistry::start().await.unwrap();
    let config = config_for(&registry, &basic::DEFAULTS);

    let output = run_basic(&registry.client(), &config).await.unwrap();

    assert!(output.contains(&format!("Connecting to: {}", registry.base_url())));
    assert!(output.contains(". Name: Fake Registry"));
    assert!(output.contains(". Version: 3.0.0-fake"));
    assert!(output.contains(". Built On: 2024-01-01T00:00:00Z"));
    assert!(output.contains(". Found 0 group(s)"));
    assert!(output.contains("(No groups found)"));
    assert!(output.contains("Example completed successfully!"));
}

#[tokio::test]
async fn basic_numbers_groups_and_prints_descriptions() {
    let registry = FakeRegistry::start().await.unwrap();
    registry.add_group("alpha", Some("First group"));
    registry.add_group("beta", None);
    let config = config_for(&registry, &basic::DEFAULTS);

    let output = run_basic(&registry.client(), &config).await.unwrap();

    assert!(output.contains(". Found 2 group(s)"));
    assert!(output.contains("  1. alpha\n     Description: First group\n"));
    assert!(output.contains("  2. beta\n"));
    assert!(!output.contains("(No groups found)"));
}

#[tokio::test]
async fn basic_tolerates_sparse_system_info() {
    let registry = FakeRegistry::start().await.unwrap();
    registry.set_system_info(serde_json::json!({ "name": "Bare" }));
    let config = config_for(&registry, &basic::DEFAULTS);

    let output = run_basic(&registry.client(), &config).await.unwrap();

    assert!(output.contains(". Name: Bare"));
    assert!(output.contains(". Description: -"));
    assert!(output.contains(". Built On: -"));
}

#[tokio::test]
async fn basic_fails_when_registry_is_unreachable() {
    let registry = FakeRegistry::start().await.unwrap();
    let config = config_for(&registry, &basic::DEFAULTS);
    let client = registry.client();
    drop(registry);
    tokio::time::sleep(Duration::from_millis(50)).await;

    let err = run_basic(&client, &config).await.unwrap_err();
    assert_matches!(err, SampleError::Registry(ref e) if e.is_transport());
}

// ---------------------------------------------------------------------------
// Artifacts
// ---------------------------------------------------------------------------

#[tokio::test]
async fn artifacts_creates_two_versions_and_prints_content() {
    let registry = FakeRegistry::start().await.unwrap();
    let config = config_for(&registry, &artifacts::DEFAULTS);

    let output = run_artifacts(&registry.client(), &config).await.unwrap();

    assert!(output.contains("Group ID: example-group"));
    assert!(output.contains(". Created artifact: example-user-schema"));
    assert!(output.contains(". Version: 1.0.0"));
    assert!(output.contains(". Type: AVRO"));
    assert!(output.contains(". Name: User Schema"));
    assert!(output.contains(". Created version: 2.0.0"));
    assert!(output.contains(". Found 2 version(s):"));
    assert!(output.contains("  - Version 1.0.0 (ENABLED)"));
    assert!(output.contains("  - Version 2.0.0 (ENABLED)"));
    assert!(output.contains(librarian_samples::schemas::USER_SCHEMA_V1));
    assert!(output.contains(librarian_samples::schemas::USER_SCHEMA_V2));

    let v1 = output.find("  - Version 1.0.0").unwrap();
    let v2 = output.find("  - Version 2.0.0").unwrap();
    assert!(v1 < v2, "versions are listed in creation order");
}

#[tokio::test]
async fn artifacts_second_run_conflicts() {
    let registry = FakeRegistry::start().await.unwrap();
    let client = registry.client();
    let config = config_for(&registry, &artifacts::DEFAULTS);

    run_artifacts(&client, &config).await.unwrap();
    let err = run_artifacts(&client, &config).await.unwrap_err();

    assert_matches!(err, SampleError::Registry(RegistryError::Conflict(_)));
}

#[tokio::test]
async fn artifacts_honours_configured_coordinates() {
    let registry = FakeRegistry::start().await.unwrap();
    let mut config = config_for(&registry, &artifacts::DEFAULTS);
    config.group_id = "team a".into();
    config.artifact_id = "users/v1".into();

    let output = run_artifacts(&registry.client(), &config).await.unwrap();

    assert!(output.contains(". Created artifact: users/v1"));
    assert!(output.contains(". Group ID: team a"));
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[tokio::test]
async fn search_on_empty_registry_reports_zero_everywhere() {
    let registry = FakeRegistry::start().await.unwrap();
    let config = config_for(&registry, &search::DEFAULTS);

    let output = run_search(&registry.client(), &config).await.unwrap();

    assert!(output.contains(". Found 0 artifact(s)"));
    assert!(output.contains(". Found 0 matching artifact(s)"));
    assert!(output.contains(". Showing 0 of 0 total artifact(s)"));
    assert!(output.contains(". Found 0 AVRO artifact(s)"));
    assert!(output.contains("Searching for artifacts in group 'example-group'"));
    assert!(output.contains(". Found 0 artifact(s) in this group"));
}

#[tokio::test]
async fn search_after_other_samples_finds_their_artifacts() {
    let registry = FakeRegistry::start().await.unwrap();
    let client = registry.client();

    run_artifacts(&client, &config_for(&registry, &artifacts::DEFAULTS))
        .await
        .unwrap();
    run_openapi(&client, &config_for(&registry, &openapi::DEFAULTS))
        .await
        .unwrap();

    let output = run_search(&client, &config_for(&registry, &search::DEFAULTS))
        .await
        .unwrap();

    assert!(output.contains(". Found 2 artifact(s)"));
    assert!(output.contains("example-group/example-user-schema"));
    assert!(output.contains("petstore-apis/petstore-api-spec"));
    assert!(output.contains(". Found 1 matching artifact(s)"));
    assert!(output.contains("     Name: User Schema"));
    assert!(output.contains(". Showing 2 of 2 total artifact(s)"));
    assert!(output.contains(". Found 1 AVRO artifact(s)"));
    assert!(output.contains("  1. example-user-schema (AVRO)"));

    // createdOn desc puts the OpenAPI artifact, created second, first.
    let page = &output[output.find("Searching with pagination").unwrap()..];
    assert!(page.contains("  1. petstore-apis/petstore-api-spec"));
    assert!(page.contains("  2. example-group/example-user-schema"));
}

#[tokio::test]
async fn search_surfaces_server_errors() {
    let registry = FakeRegistry::start().await.unwrap();
    registry.fail_with(Some(StatusCode::INTERNAL_SERVER_ERROR));
    let config = config_for(&registry, &search::DEFAULTS);

    let err = run_search(&registry.client(), &config).await.unwrap_err();

    assert_matches!(
        err,
        SampleError::Registry(RegistryError::Server { status, .. }) if status == 500
    );
}

// ---------------------------------------------------------------------------
// OpenAPI
// ---------------------------------------------------------------------------

#[tokio::test]
async fn openapi_summarises_and_compares_versions() {
    let registry = FakeRegistry::start().await.unwrap();
    let config = config_for(&registry, &openapi::DEFAULTS);

    let output = run_openapi(&registry.client(), &config).await.unwrap();

    assert!(output.contains("Group ID: petstore-apis"));
    assert!(output.contains(". Created artifact: petstore-api-spec"));
    assert!(output.contains(". Type: OPENAPI"));
    assert!(output.contains(". Initial version: 1.0.0"));
    assert!(output.contains(". API Title: Pet Store API"));
    assert!(output.contains(". API Version: 1.0.0"));
    assert!(output.contains(". API Version: 2.0.0"));
    assert!(output.contains(". Endpoints: /pets\n"));
    assert!(output.contains(". Endpoints: /pets, /pets/{petId}\n"));
    assert!(output.contains("   /pets: GET, POST"));
    assert!(output.contains("   /pets/{petId}: GET, DELETE"));
    assert!(output.contains(". v1.0.0 had 1 endpoint(s)"));
    assert!(output.contains(". v2.0.0 has 2 endpoint(s)"));
    assert!(output.contains(". New endpoints in v2.0.0: /pets/{petId}"));
    assert!(output.contains("  1. Version 1.0.0 (ENABLED)"));
    assert!(output.contains("  2. Version 2.0.0 (ENABLED)"));
}

#[tokio::test]
async fn openapi_reports_existing_artifact_as_conflict() {
    let registry = FakeRegistry::start().await.unwrap();
    let client = registry.client();
    let config = config_for(&registry, &openapi::DEFAULTS);

    run_openapi(&client, &config).await.unwrap();
    let requests_after_first_run = registry.request_count();
    let err = run_openapi(&client, &config).await.unwrap_err();

    assert_matches!(err, SampleError::Registry(RegistryError::Conflict(ref msg)) if msg.contains("petstore-api-spec"));
    // The run stops at the failed create.
    assert_eq!(registry.request_count(), requests_after_first_run + 1);
}
