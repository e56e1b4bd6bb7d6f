//! Endpoint summary of an OpenAPI document.
//!
//! Used by the OpenAPI sample to describe what each stored version exposes
//! and what changed between two versions. Path order follows the document.

use indexmap::IndexMap;
use serde::Deserialize;

/// Keys of a path item that are HTTP operations.
const HTTP_METHODS: &[&str] = &[
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

#[derive(Debug, thiserror::Error)]
pub enum SummaryError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct Document {
    info: Info,
    #[serde(default)]
    paths: IndexMap<String, IndexMap<String, serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct Info {
    title: String,
    version: String,
}

/// One path and the operations defined on it, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathOperations {
    pub path: String,
    pub operations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSummary {
    pub title: String,
    pub version: String,
    pub paths: Vec<PathOperations>,
}

impl ApiSummary {
    /// Summarise a JSON-encoded OpenAPI document.
    pub fn parse(document: &str) -> Result<Self, SummaryError> {
        let doc: Document = serde_json::from_str(document)?;

        let paths = doc
            .paths
            .into_iter()
            .map(|(path, item)| PathOperations {
                path,
                operations: item
                    .into_keys()
                    .filter(|key| HTTP_METHODS.contains(&key.as_str()))
                    .collect(),
            })
            .collect();

        Ok(Self {
            title: doc.info.title,
            version: doc.info.version,
            paths,
        })
    }

    pub fn endpoints(&self) -> Vec<&str> {
        self.paths.iter().map(|p| p.path.as_str()).collect()
    }

    /// Paths present here but absent from `previous`.
    pub fn new_endpoints<'a>(&'a self, previous: &ApiSummary) -> Vec<&'a str> {
        let known = previous.endpoints();
        self.endpoints()
            .into_iter()
            .filter(|path| !known.contains(path))
            .collect()
    }
}

impl PathOperations {
    /// Operations joined for display, e.g. `GET, POST`.
    pub fn display_operations(&self) -> String {
        self.operations.join(", ").to_uppercase()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::{PETSTORE_V1, PETSTORE_V2};

    #[test]
    fn summarises_petstore_v1() {
        let summary = ApiSummary::parse(PETSTORE_V1).unwrap();
        assert_eq!(summary.title, "Pet Store API");
        assert_eq!(summary.version, "1.0.0");
        assert_eq!(summary.endpoints(), ["/pets"]);
        assert_eq!(summary.paths[0].display_operations(), "GET, POST");
    }

    #[test]
    fn finds_endpoints_added_in_v2() {
        let v1 = ApiSummary::parse(PETSTORE_V1).unwrap();
        let v2 = ApiSummary::parse(PETSTORE_V2).unwrap();
        assert_eq!(v2.endpoints(), ["/pets", "/pets/{petId}"]);
        assert_eq!(v2.new_endpoints(&v1), ["/pets/{petId}"]);
        assert!(v1.new_endpoints(&v2).is_empty());
    }

    #[test]
    fn path_level_parameters_are_not_operations() {
        let doc = r#"{
            "info": {"title": "t", "version": "1"},
            "paths": {
                "/z": {"parameters": [], "summary": "s", "put": {}},
                "/a": {"get": {}, "delete": {}}
            }
        }"#;
        let summary = ApiSummary::parse(doc).unwrap();
        assert_eq!(summary.endpoints(), ["/z", "/a"]);
        assert_eq!(summary.paths[0].operations, ["put"]);
        assert_eq!(summary.paths[1].display_operations(), "GET, DELETE");
    }

    #[test]
    fn missing_info_is_an_error() {
        assert!(ApiSummary::parse(r#"{"paths": {}}"#).is_err());
        assert!(ApiSummary::parse("not json").is_err());
    }
}
