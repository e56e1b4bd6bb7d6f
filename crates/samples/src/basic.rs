//! Connectivity check: system info and the list of groups.

use std::io::Write;

use librarian_registry::RegistryClient;

use crate::config::{SampleConfig, SampleDefaults};
use crate::display::{text, timestamp};
use crate::error::SampleError;

pub const DEFAULTS: SampleDefaults = SampleDefaults {
    group_id: "example-group",
    artifact_id: "example-user-schema",
};

pub async fn run(
    client: &RegistryClient,
    config: &SampleConfig,
    out: &mut impl Write,
) -> Result<(), SampleError> {
    writeln!(out, "=== Schema Registry - Basic Example ===\n")?;
    writeln!(out, "Connecting to: {}", config.registry_url)?;

    writeln!(out, "\n. Fetching system information...")?;
    let info = client.system_info().await?;
    writeln!(out, ". Name: {}", text(info.name.as_deref()))?;
    writeln!(out, ". Description: {}", text(info.description.as_deref()))?;
    writeln!(out, ". Version: {}", text(info.version.as_deref()))?;
    writeln!(out, ". Built On: {}", timestamp(info.built_on.as_ref()))?;

    writeln!(out, "\n. Fetching groups...")?;
    let groups = client.list_groups().await?;
    writeln!(out, ". Found {} group(s)", groups.len())?;

    if groups.is_empty() {
        writeln!(out, "  (No groups found)")?;
    } else {
        writeln!(out, "\nGroups:")?;
        for (index, group) in groups.iter().enumerate() {
            writeln!(out, "  {}. {}", index + 1, group.group_id)?;
            if let Some(description) = group.description.as_deref().filter(|d| !d.is_empty()) {
                writeln!(out, "     Description: {description}")?;
            }
        }
    }

    writeln!(out, "\n. Example completed successfully!")?;
    Ok(())
}
