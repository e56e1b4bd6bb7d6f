//! Artifact lifecycle: create an Avro schema, evolve it, read it back.

use std::io::Write;

use librarian_registry::models::ARTIFACT_TYPE_AVRO;
use librarian_registry::{CreateArtifact, CreateVersion, RegistryClient, VersionContent};

use crate::config::{SampleConfig, SampleDefaults};
use crate::display::{text, timestamp};
use crate::error::SampleError;
use crate::schemas::{USER_SCHEMA_V1, USER_SCHEMA_V2};

pub const DEFAULTS: SampleDefaults = SampleDefaults {
    group_id: "example-group",
    artifact_id: "example-user-schema",
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

    writeln!(out, "=== Schema Registry - Artifacts Example ===\n")?;
    writeln!(out, "Registry: {}", config.registry_url)?;
    writeln!(out, "Group ID: {group_id}")?;
    writeln!(out, "Artifact ID: {artifact_id}\n")?;

    writeln!(out, ". Creating artifact with initial schema...")?;
    let request = CreateArtifact::new(
        artifact_id,
        ARTIFACT_TYPE_AVRO,
        CreateVersion::new(FIRST_VERSION, VersionContent::json(USER_SCHEMA_V1)),
    )
    .name("User Schema")
    .description("Example user schema for demonstration");
    let created = client.create_artifact(group_id, &request).await?;
    writeln!(out, ". Created artifact: {}", created.artifact.artifact_id)?;
    writeln!(
        out,
        ". Version: {}",
        text(created.version.as_ref().map(|v| v.version.as_str()))
    )?;

    writeln!(out, "\n. Fetching artifact metadata...")?;
    let metadata = client.get_artifact_metadata(group_id, artifact_id).await?;
    writeln!(out, ". Artifact ID: {}", metadata.artifact_id)?;
    writeln!(out, ". Group ID: {}", metadata.group())?;
    writeln!(out, ". Type: {}", metadata.artifact_type)?;
    writeln!(out, ". Name: {}", text(metadata.name.as_deref()))?;
    writeln!(out, ". Description: {}", text(metadata.description.as_deref()))?;
    writeln!(out, ". Created On: {}", timestamp(metadata.created_on.as_ref()))?;
    writeln!(out, ". Modified On: {}", timestamp(metadata.modified_on.as_ref()))?;

    writeln!(out, "\n. Creating new version (v2) with additional field...")?;
    let version = client
        .create_version(
            group_id,
            artifact_id,
            &CreateVersion::new(SECOND_VERSION, VersionContent::json(USER_SCHEMA_V2)),
        )
        .await?;
    writeln!(out, ". Created version: {}", version.version)?;

    writeln!(out, "\n. Listing all versions...")?;
    let versions = client.list_versions(group_id, artifact_id).await?;
    writeln!(out, ". Found {} version(s):", versions.len())?;
    for v in &versions {
        writeln!(out, "  - Version {} ({})", v.version, text(v.state.as_ref()))?;
        writeln!(out, "    Created: {}", timestamp(v.created_on.as_ref()))?;
    }

    for label in [FIRST_VERSION, SECOND_VERSION] {
        writeln!(out, "\n. Retrieving version {label} content...")?;
        let content = client
            .get_version_content(group_id, artifact_id, label)
            .await?;
        writeln!(out, ". Version {label} schema:")?;
        writeln!(out, "{content}")?;
    }

    writeln!(out, "\n. Example completed successfully!")?;
    writeln!(
        out,
        "\n. Tip: the artifact is now visible in the registry UI under group '{group_id}'"
    )?;
    Ok(())
}
