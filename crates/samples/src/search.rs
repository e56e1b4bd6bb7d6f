//! Search walkthrough: filters, ordering and pagination.

use std::io::Write;

use librarian_registry::models::ARTIFACT_TYPE_AVRO;
use librarian_registry::{ArtifactSearch, ArtifactSortBy, RegistryClient, SortOrder};

use crate::config::{SampleConfig, SampleDefaults};
use crate::display::{text, timestamp};
use crate::error::SampleError;

pub const DEFAULTS: SampleDefaults = SampleDefaults {
    group_id: "example-group",
    artifact_id: "example-user-schema",
};

const NAME_FILTER: &str = "user";
const PAGE_LIMIT: u32 = 5;

pub async fn run(
    client: &RegistryClient,
    config: &SampleConfig,
    out: &mut impl Write,
) -> Result<(), SampleError> {
    writeln!(out, "=== Schema Registry - Search Example ===\n")?;
    writeln!(out, "Registry: {}\n", config.registry_url)?;

    writeln!(out, ". Searching for all artifacts...")?;
    let all = client.search_artifacts(&ArtifactSearch::new()).await?;
    writeln!(out, ". Found {} artifact(s)", all.count)?;
    if !all.artifacts.is_empty() {
        writeln!(out, "\nArtifacts:")?;
        for (index, artifact) in all.artifacts.iter().enumerate() {
            writeln!(out, "  {}. {}", index + 1, artifact.coordinates())?;
            writeln!(out, "     Type: {}", artifact.artifact_type)?;
            if let Some(name) = &artifact.name {
                writeln!(out, "     Name: {name}")?;
            }
            if let Some(description) = &artifact.description {
                writeln!(out, "     Description: {description}")?;
            }
            writeln!(out, "     Modified: {}", timestamp(artifact.modified_on.as_ref()))?;
            writeln!(out)?;
        }
    }

    writeln!(
        out,
        "\n. Searching for artifacts with name containing '{NAME_FILTER}'..."
    )?;
    let by_name = client
        .search_artifacts(
            &ArtifactSearch::new()
                .name(NAME_FILTER)
                .order(SortOrder::Asc)
                .order_by(ArtifactSortBy::Name),
        )
        .await?;
    writeln!(out, ". Found {} matching artifact(s)", by_name.count)?;
    for (index, artifact) in by_name.artifacts.iter().enumerate() {
        writeln!(out, "  {}. {}", index + 1, artifact.coordinates())?;
        writeln!(out, "     Name: {}", text(artifact.name.as_deref()))?;
    }

    writeln!(out, "\n. Searching with pagination (limit: {PAGE_LIMIT})...")?;
    let page = client
        .search_artifacts(
            &ArtifactSearch::new()
                .limit(PAGE_LIMIT)
                .offset(0)
                .order(SortOrder::Desc)
                .order_by(ArtifactSortBy::CreatedOn),
        )
        .await?;
    writeln!(
        out,
        ". Showing {} of {} total artifact(s)",
        page.artifacts.len(),
        page.count
    )?;
    for (index, artifact) in page.artifacts.iter().enumerate() {
        writeln!(out, "  {}. {}", index + 1, artifact.coordinates())?;
        writeln!(out, "     Created: {}", timestamp(artifact.created_on.as_ref()))?;
    }

    writeln!(out, "\n. Searching for {ARTIFACT_TYPE_AVRO} artifacts...")?;
    let avro = client
        .search_artifacts(&ArtifactSearch::new().artifact_type(ARTIFACT_TYPE_AVRO))
        .await?;
    writeln!(out, ". Found {} {ARTIFACT_TYPE_AVRO} artifact(s)", avro.count)?;

    let group_id = config.group_id.as_str();
    writeln!(out, "\n. Searching for artifacts in group '{group_id}'...")?;
    let in_group = client
        .search_artifacts(&ArtifactSearch::new().group_id(group_id))
        .await?;
    writeln!(out, ". Found {} artifact(s) in this group", in_group.count)?;
    for (index, artifact) in in_group.artifacts.iter().enumerate() {
        writeln!(
            out,
            "  {}. {} ({})",
            index + 1,
            artifact.artifact_id,
            artifact.artifact_type
        )?;
    }

    writeln!(out, "\n. Example completed successfully!")?;
    Ok(())
}
