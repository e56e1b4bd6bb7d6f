//! API design workflow: store an OpenAPI document, publish a second
//! version and compare what each one exposes.

use std::io::Write;

use librarian_registry::models::ARTIFACT_TYPE_OPENAPI;
use librarian_registry::{CreateArtifact, CreateVersion, RegistryClient, VersionContent};

use crate::config::{SampleConfig, SampleDefaults};
use crate::display::{text, timestamp};
use crate::error::SampleError;
use crate::schemas::{PETSTORE_V1, PETSTORE_V2};
use crate::spec_summary::ApiSummary;

pub const DEFAULTS: SampleDefaults = SampleDefaults {
    group_id: "petstore-apis",
    artifact_id: "petstore-api-spec",
};

const FIRST_VERSION: &str = "1.0.0";
const SECOND_VERSION: &str = "2.0.0";

pub async fn run(
    client: &RegistryClient,
    config: &SampleConfig,
    out: &mut impl Write,
) -> Result<(), SampleError> {
    let group_id = config.group_id.as_str();
    let artifact_id = config.artifact_id.as_str();

    writeln!(out, "=== Schema Registry - OpenAPI Example ===\n")?;
    writeln!(out, "Registry: {}", config.registry_url)?;
    writeln!(out, "Group ID: {group_id}")?;
    writeln!(out, "Artifact ID: {artifact_id}\n")?;

    writeln!(out, ". Creating OpenAPI artifact with v{FIRST_VERSION} specification...")?;
    let request = CreateArtifact::new(
        artifact_id,
        ARTIFACT_TYPE_OPENAPI,
        CreateVersion::new(FIRST_VERSION, VersionContent::json(PETSTORE_V1)),
    )
    .name("Pet Store API")
    .description("OpenAPI specification for the Pet Store REST API");
    let created = client.create_artifact(group_id, &request).await?;
    writeln!(out, ". Created artifact: {}", created.artifact.artifact_id)?;
    writeln!(out, ". Type: {}", created.artifact.artifact_type)?;
    writeln!(
        out,
        ". Initial version: {}",
        text(created.version.as_ref().map(|v| v.version.as_str()))
    )?;

    writeln!(out, "\n. Fetching OpenAPI artifact metadata...")?;
    let metadata = client.get_artifact_metadata(group_id, artifact_id).await?;
    writeln!(out, ". Artifact ID: {}", metadata.artifact_id)?;
    writeln!(out, ". Group ID: {}", metadata.group())?;
    writeln!(out, ". Type: {}", metadata.artifact_type)?;
    writeln!(out, ". Name: {}", text(metadata.name.as_deref()))?;
    writeln!(out, ". Description: {}", text(metadata.description.as_deref()))?;
    writeln!(out, ". Created On: {}", timestamp(metadata.created_on.as_ref()))?;

    writeln!(out, "\n. Retrieving v{FIRST_VERSION} OpenAPI specification...")?;
    let v1 = fetch_summary(client, group_id, artifact_id, FIRST_VERSION).await?;
    write_summary(out, &v1)?;

    writeln!(out, "\n. Creating v{SECOND_VERSION} with additional endpoints...")?;
    let version = client
        .create_version(
            group_id,
            artifact_id,
            &CreateVersion::new(SECOND_VERSION, VersionContent::json(PETSTORE_V2)),
        )
        .await?;
    writeln!(out, ". Created version: {}", version.version)?;

    writeln!(out, "\n. Retrieving v{SECOND_VERSION} OpenAPI specification...")?;
    let v2 = fetch_summary(client, group_id, artifact_id, SECOND_VERSION).await?;
    write_summary(out, &v2)?;

    writeln!(out, "\n. Version Comparison:")?;
    writeln!(out, ". v{FIRST_VERSION} had {} endpoint(s)", v1.paths.len())?;
    writeln!(out, ". v{SECOND_VERSION} has {} endpoint(s)", v2.paths.len())?;
    let added = v2.new_endpoints(&v1);
    if !added.is_empty() {
        writeln!(out, ". New endpoints in v{SECOND_VERSION}: {}", added.join(", "))?;
    }

    writeln!(out, "\n. All versions of this OpenAPI specification:")?;
    let versions = client.list_versions(group_id, artifact_id).await?;
    for (index, v) in versions.iter().enumerate() {
        writeln!(
            out,
            "  {}. Version {} ({})",
            index + 1,
            v.version,
            text(v.state.as_ref())
        )?;
        writeln!(out, "     Created: {}", timestamp(v.created_on.as_ref()))?;
    }

    writeln!(out, "\n. Example completed successfully!")?;
    Ok(())
}

async fn fetch_summary(
    client: &RegistryClient,
    group_id: &str,
    artifact_id: &str,
    version: &str,
) -> Result<ApiSummary, SampleError> {
    let content = client
        .get_version_content(group_id, artifact_id, version)
        .await?;
    ApiSummary::parse(&content).map_err(|source| SampleError::OpenApi {
        version: version.to_string(),
        source,
    })
}

fn write_summary(out: &mut impl Write, summary: &ApiSummary) -> std::io::Result<()> {
    writeln!(out, ". API Title: {}", summary.title)?;
    writeln!(out, ". API Version: {}", summary.version)?;
    writeln!(out, ". Endpoints: {}", summary.endpoints().join(", "))?;
    writeln!(out, ". Operations:")?;
    for path in &summary.paths {
        writeln!(out, "   {}: {}", path.path, path.display_operations())?;
    }
    Ok(())
}
