//! The OpenAPI document rendered by the Swagger UI.
//!
//! Loaded once at startup from a file, the copy compiled into the binary,
//! or a schema registry, and kept as JSON for the rest of the process.

use std::path::Path;

use librarian_registry::{RegistryClient, RegistryError};
use serde_json::Value;

use crate::config::DocsSource;

/// The service's own API description, embedded at build time.
pub const BUNDLED_SPEC: &str = include_str!("../openapi.yaml");

#[derive(Debug, thiserror::Error)]
pub enum DocsError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse OpenAPI document: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("OpenAPI document must be a mapping with an 'openapi' version field")]
    NotOpenApi,

    #[error("Failed to fetch OpenAPI document from registry: {0}")]
    Registry(#[from] RegistryError),
}

/// A parsed OpenAPI document plus a note of where it came from.
#[derive(Debug, Clone)]
pub struct ApiDocs {
    document: Value,
    origin: String,
}

impl ApiDocs {
    /// Load the document from `source`.
    pub async fn load(source: &DocsSource) -> Result<Self, DocsError> {
        match source {
            DocsSource::File { path } => Self::from_file(path),
            DocsSource::Registry {
                registry_url,
                group_id,
                artifact_id,
                version,
            } => {
                let client = RegistryClient::new(registry_url)?;
                Self::from_registry(&client, group_id, artifact_id, version).await
            }
        }
    }

    /// Parse a YAML or JSON document.
    pub fn parse(raw: &str, origin: impl Into<String>) -> Result<Self, DocsError> {
        let document: Value = serde_yaml::from_str(raw)?;
        if !document.get("openapi").is_some_and(Value::is_string) {
            return Err(DocsError::NotOpenApi);
        }
        Ok(Self {
            document,
            origin: origin.into(),
        })
    }

    pub fn bundled() -> Result<Self, DocsError> {
        Self::parse(BUNDLED_SPEC, "bundled")
    }

    /// Read `path`, falling back to the bundled document when it is absent.
    pub fn from_file(path: &Path) -> Result<Self, DocsError> {
        match std::fs::read_to_string(path) {
            Ok(raw) => Self::parse(&raw, path.display().to_string()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "OpenAPI file not found, using bundled document");
                Self::bundled()
            }
            Err(source) => Err(DocsError::Io {
                path: path.display().to_string(),
                source,
            }),
        }
    }

    pub async fn from_registry(
        client: &RegistryClient,
        group_id: &str,
        artifact_id: &str,
        version: &str,
    ) -> Result<Self, DocsError> {
        let raw = client
            .get_version_content(group_id, artifact_id, version)
            .await?;
        let origin = format!("{}{group_id}/{artifact_id}@{version}", client.base_url());
        Self::parse(&raw, origin)
    }

    pub fn document(&self) -> &Value {
        &self.document
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn title(&self) -> Option<&str> {
        self.document["info"]["title"].as_str()
    }

    pub fn version(&self) -> Option<&str> {
        self.document["info"]["version"].as_str()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
