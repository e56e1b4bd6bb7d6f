//! Wire types for the registry v3 REST API.
//!
//! Field names follow the server's camelCase JSON. Everything the server
//! may leave out is an `Option` so partially populated responses still
//! deserialise.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

/// All registry timestamps are UTC.
pub type Timestamp = DateTime<Utc>;

/// Group name the registry uses when an artifact was created without one.
pub const DEFAULT_GROUP: &str = "default";

/// Artifact type for Apache Avro schemas.
pub const ARTIFACT_TYPE_AVRO: &str = "AVRO";
/// Artifact type for OpenAPI documents.
pub const ARTIFACT_TYPE_OPENAPI: &str = "OPENAPI";
/// Artifact type for JSON Schema documents.
pub const ARTIFACT_TYPE_JSON: &str = "JSON";
/// Artifact type for Protobuf schemas.
pub const ARTIFACT_TYPE_PROTOBUF: &str = "PROTOBUF";

/// Content type used for JSON-encoded schema documents.
pub const CONTENT_TYPE_JSON: &str = "application/json";

// ---------------------------------------------------------------------------
// System
// ---------------------------------------------------------------------------

/// Response of `GET /system/info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default, deserialize_with = "timestamp::deserialize")]
    pub built_on: Option<Timestamp>,
}

// ---------------------------------------------------------------------------
// Groups
// ---------------------------------------------------------------------------

/// A group as returned by `GET /groups`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMetaData {
    pub group_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, deserialize_with = "timestamp::deserialize")]
    pub created_on: Option<Timestamp>,
    #[serde(default, deserialize_with = "timestamp::deserialize")]
    pub modified_on: Option<Timestamp>,
}

/// One page of `GET /groups`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupSearchResults {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub groups: Vec<GroupMetaData>,
}

// ---------------------------------------------------------------------------
// Artifacts
// ---------------------------------------------------------------------------

/// Artifact descriptor returned by metadata lookups, artifact creation and
/// search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactMetaData {
    /// `None` means the artifact lives in the registry's default group.
    #[serde(default)]
    pub group_id: Option<String>,
    pub artifact_id: String,
    pub artifact_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, deserialize_with = "timestamp::deserialize")]
    pub created_on: Option<Timestamp>,
    #[serde(default, deserialize_with = "timestamp::deserialize")]
    pub modified_on: Option<Timestamp>,
}

impl ArtifactMetaData {
    /// The artifact's group, falling back to [`DEFAULT_GROUP`].
    pub fn group(&self) -> &str {
        self.group_id.as_deref().unwrap_or(DEFAULT_GROUP)
    }

    /// `group/artifact` coordinate used in listings.
    pub fn coordinates(&self) -> String {
        format!("{}/{}", self.group(), self.artifact_id)
    }
}

/// Search hits share the metadata shape.
pub type SearchedArtifact = ArtifactMetaData;

/// One page of `GET /search/artifacts`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtifactSearchResults {
    /// Total number of matches before `offset`/`limit` were applied.
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub artifacts: Vec<SearchedArtifact>,
}

/// Body of `POST /groups/{groupId}/artifacts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateArtifact {
    pub artifact_id: String,
    pub artifact_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub first_version: CreateVersion,
}

impl CreateArtifact {
    /// Start a create request. Every artifact is created together with its
    /// first version.
    pub fn new(
        artifact_id: impl Into<String>,
        artifact_type: impl Into<String>,
        first_version: CreateVersion,
    ) -> Self {
        Self {
            artifact_id: artifact_id.into(),
            artifact_type: artifact_type.into(),
            name: None,
            description: None,
            first_version,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Reject requests the server would refuse for missing fields.
    pub fn validate(&self) -> Result<(), RegistryError> {
        require_non_empty(&self.artifact_id, "artifactId")?;
        require_non_empty(&self.artifact_type, "artifactType")?;
        self.first_version.validate()
    }
}

/// Response of `POST /groups/{groupId}/artifacts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateArtifactResponse {
    pub artifact: ArtifactMetaData,
    #[serde(default)]
    pub version: Option<VersionMetaData>,
}

// ---------------------------------------------------------------------------
// Versions
// ---------------------------------------------------------------------------

/// Lifecycle state of a version. Unrecognised values are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VersionState {
    Enabled,
    Disabled,
    Deprecated,
    Draft,
    Other(String),
}

impl From<String> for VersionState {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "ENABLED" => Self::Enabled,
            "DISABLED" => Self::Disabled,
            "DEPRECATED" => Self::Deprecated,
            "DRAFT" => Self::Draft,
            _ => Self::Other(raw),
        }
    }
}

impl From<VersionState> for String {
    fn from(state: VersionState) -> Self {
        state.to_string()
    }
}

impl fmt::Display for VersionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enabled => f.write_str("ENABLED"),
            Self::Disabled => f.write_str("DISABLED"),
            Self::Deprecated => f.write_str("DEPRECATED"),
            Self::Draft => f.write_str("DRAFT"),
            Self::Other(raw) => f.write_str(raw),
        }
    }
}

/// Version descriptor returned by version creation and listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionMetaData {
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<VersionState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "timestamp::deserialize")]
    pub created_on: Option<Timestamp>,
}

/// Listing entries share the metadata shape.
pub type SearchedVersion = VersionMetaData;

/// One page of `GET /groups/{g}/artifacts/{a}/versions`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VersionSearchResults {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub versions: Vec<SearchedVersion>,
}

/// Raw document plus the media type it is encoded in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionContent {
    pub content: String,
    pub content_type: String,
}

impl VersionContent {
    pub fn new(content: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            content_type: content_type.into(),
        }
    }

    /// Content encoded as `application/json`.
    pub fn json(content: impl Into<String>) -> Self {
        Self::new(content, CONTENT_TYPE_JSON)
    }
}

/// Body of `POST /groups/{g}/artifacts/{a}/versions`, also used as the
/// `firstVersion` of a new artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVersion {
    pub version: String,
    pub content: VersionContent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CreateVersion {
    pub fn new(version: impl Into<String>, content: VersionContent) -> Self {
        Self {
            version: version.into(),
            content,
            name: None,
            description: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn validate(&self) -> Result<(), RegistryError> {
        require_non_empty(&self.version, "version")?;
        require_non_empty(&self.content.content, "content")?;
        require_non_empty(&self.content.content_type, "contentType")
    }
}

/// Selects one version of an artifact: a literal label or the `latest`
/// alias (the tip of the artifact's `latest` branch).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionExpression {
    Label(String),
    Latest,
}

impl fmt::Display for VersionExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Label(label) => f.write_str(label),
            Self::Latest => f.write_str("branch=latest"),
        }
    }
}

impl From<&str> for VersionExpression {
    /// `"latest"` is the alias; anything else is a literal label.
    fn from(raw: &str) -> Self {
        match raw {
            "latest" | "branch=latest" => Self::Latest,
            label => Self::Label(label.to_string()),
        }
    }
}

impl From<String> for VersionExpression {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

pub(crate) fn require_non_empty(value: &str, field: &str) -> Result<(), RegistryError> {
    if value.trim().is_empty() {
        return Err(RegistryError::Validation(format!("{field} is required")));
    }
    Ok(())
}

/// Lenient timestamp parsing: RFC 3339 first, then the `+0000` offset form
/// older registry builds emit.
pub(crate) mod timestamp {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer};

    pub fn parse(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        DateTime::parse_from_rfc3339(raw)
            .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%z"))
            .map(|dt| dt.with_timezone(&Utc))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|s| parse(&s).map_err(de::Error::custom)).transpose()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
