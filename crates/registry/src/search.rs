//! Query parameters for `GET /search/artifacts`.

use serde::{Deserialize, Serialize};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Artifact attribute a search can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ArtifactSortBy {
    GroupId,
    ArtifactId,
    Name,
    ArtifactType,
    CreatedOn,
    ModifiedOn,
}

/// Filter, ordering and pagination for an artifact search.
///
/// Unset options are omitted from the query string so the server applies
/// its own defaults (no filter, `limit=20`, `offset=0`).
///
/// ```ignore
/// let search = ArtifactSearch::new()
///     .name("user")
///     .order(SortOrder::Asc)
///     .order_by(ArtifactSortBy::Name);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactSearch {
    /// Substring match on the artifact name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Exact match on the artifact type (e.g. `AVRO`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact_type: Option<String>,
    /// Exact match on the owning group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<SortOrder>,
    #[serde(default, rename = "orderby", skip_serializing_if = "Option::is_none")]
    pub order_by: Option<ArtifactSortBy>,
}

impl ArtifactSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn artifact_type(mut self, artifact_type: impl Into<String>) -> Self {
        self.artifact_type = Some(artifact_type.into());
        self
    }

    pub fn group_id(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = Some(order);
        self
    }

    pub fn order_by(mut self, order_by: ArtifactSortBy) -> Self {
        self.order_by = Some(order_by);
        self
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_search_serialises_to_no_params() {
        let value = serde_json::to_value(ArtifactSearch::new()).unwrap();
        assert_eq!(value, serde_json::json!({}));
    }

    #[test]
    fn wire_names_match_registry_query_params() {
        let search = ArtifactSearch::new()
            .artifact_type("AVRO")
            .group_id("g")
            .limit(5)
            .offset(10)
            .order(SortOrder::Desc)
            .order_by(ArtifactSortBy::CreatedOn);

        let value = serde_json::to_value(&search).unwrap();
        assert_eq!(value["artifactType"], "AVRO");
        assert_eq!(value["groupId"], "g");
        assert_eq!(value["limit"], 5);
        assert_eq!(value["offset"], 10);
        assert_eq!(value["order"], "desc");
        assert_eq!(value["orderby"], "createdOn");
    }
}
