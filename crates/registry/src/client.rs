//! HTTP client for a schema registry's v3 REST API.
//!
//! [`RegistryClient`] maps each registry resource to a typed async method
//! using [`reqwest`]. Calls are independent; callers await them one at a
//! time and decide what to do with a [`RegistryError`].

use std::time::Duration;

use reqwest::{RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;

use crate::error::RegistryError;
use crate::models::{
    require_non_empty, ArtifactMetaData, ArtifactSearchResults, CreateArtifact,
    CreateArtifactResponse, CreateVersion, GroupMetaData, GroupSearchResults, SystemInfo,
    VersionExpression, VersionMetaData, VersionSearchResults,
};
use crate::search::ArtifactSearch;

/// Registry endpoint used when nothing else is configured.
pub const DEFAULT_REGISTRY_URL: &str = "http://localhost:8080/apis/registry/v3/";

/// Upper bound on a single request, including reading the body.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Page size used when draining paginated listings.
const PAGE_SIZE: u32 = 100;

/// Typed façade over one registry instance.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    client: reqwest::Client,
    base_url: Url,
}

impl RegistryClient {
    /// Create a client for `base_url` (e.g. `http://host:8080/apis/registry/v3/`)
    /// with [`DEFAULT_TIMEOUT`]. A trailing slash is optional.
    pub fn new(base_url: &str) -> Result<Self, RegistryError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client whose requests fail with
    /// [`RegistryError::Transport`] after `timeout`.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, RegistryError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Self::with_client(client, base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`]
    /// (useful for sharing a connection pool).
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Result<Self, RegistryError> {
        let parsed = Url::parse(base_url).map_err(|e| {
            RegistryError::Validation(format!("invalid registry URL '{base_url}': {e}"))
        })?;

        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(RegistryError::Validation(format!(
                "registry URL must be an http(s) URL: '{base_url}'"
            )));
        }

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    /// The registry API root this client talks to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET /system/info`
    pub async fn system_info(&self) -> Result<SystemInfo, RegistryError> {
        let url = self.endpoint(&["system", "info"])?;
        self.fetch_json(self.client.get(url)).await
    }

    /// `GET /groups`, following pagination until every group is collected.
    pub async fn list_groups(&self) -> Result<Vec<GroupMetaData>, RegistryError> {
        let url = self.endpoint(&["groups"])?;
        self.fetch_all::<GroupSearchResults>(url, &[]).await
    }

    /// `POST /groups/{groupId}/artifacts`
    ///
    /// Creates the artifact together with its first version.
    pub async fn create_artifact(
        &self,
        group_id: &str,
        request: &CreateArtifact,
    ) -> Result<CreateArtifactResponse, RegistryError> {
        require_non_empty(group_id, "groupId")?;
        request.validate()?;

        let url = self.endpoint(&["groups", group_id, "artifacts"])?;
        let created: CreateArtifactResponse =
            self.fetch_json(self.client.post(url).json(request)).await?;

        tracing::info!(
            group_id,
            artifact_id = %created.artifact.artifact_id,
            artifact_type = %created.artifact.artifact_type,
            "Artifact created",
        );
        Ok(created)
    }

    /// `GET /groups/{groupId}/artifacts/{artifactId}`
    pub async fn get_artifact_metadata(
        &self,
        group_id: &str,
        artifact_id: &str,
    ) -> Result<ArtifactMetaData, RegistryError> {
        require_non_empty(group_id, "groupId")?;
        require_non_empty(artifact_id, "artifactId")?;

        let url = self.endpoint(&["groups", group_id, "artifacts", artifact_id])?;
        self.fetch_json(self.client.get(url)).await
    }

    /// `POST /groups/{groupId}/artifacts/{artifactId}/versions`
    pub async fn create_version(
        &self,
        group_id: &str,
        artifact_id: &str,
        request: &CreateVersion,
    ) -> Result<VersionMetaData, RegistryError> {
        require_non_empty(group_id, "groupId")?;
        require_non_empty(artifact_id, "artifactId")?;
        request.validate()?;

        let url = self.endpoint(&["groups", group_id, "artifacts", artifact_id, "versions"])?;
        let created: VersionMetaData = self.fetch_json(self.client.post(url).json(request)).await?;

        tracing::info!(group_id, artifact_id, version = %created.version, "Version created");
        Ok(created)
    }

    /// `GET /groups/{groupId}/artifacts/{artifactId}/versions`
    ///
    /// Returns every version in creation order (ascending global id).
    pub async fn list_versions(
        &self,
        group_id: &str,
        artifact_id: &str,
    ) -> Result<Vec<VersionMetaData>, RegistryError> {
        require_non_empty(group_id, "groupId")?;
        require_non_empty(artifact_id, "artifactId")?;

        let url = self.endpoint(&["groups", group_id, "artifacts", artifact_id, "versions"])?;
        self.fetch_all::<VersionSearchResults>(url, &[("order", "asc"), ("orderby", "globalId")])
            .await
    }

    /// `GET /groups/{groupId}/artifacts/{artifactId}/versions/{expr}/content`
    ///
    /// Returns the stored document exactly as submitted.
    pub async fn get_version_content(
        &self,
        group_id: &str,
        artifact_id: &str,
        version: impl Into<VersionExpression>,
    ) -> Result<String, RegistryError> {
        require_non_empty(group_id, "groupId")?;
        require_non_empty(artifact_id, "artifactId")?;
        let expression = version.into().to_string();
        require_non_empty(&expression, "version")?;

        let url = self.endpoint(&[
            "groups",
            group_id,
            "artifacts",
            artifact_id,
            "versions",
            &expression,
            "content",
        ])?;

        let response = self.execute(self.client.get(url)).await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        String::from_utf8(bytes.to_vec())
            .map_err(|_| RegistryError::malformed(status, "content is not valid UTF-8"))
    }

    /// `GET /search/artifacts`
    ///
    /// Returns a single page: `count` is the total number of matches and
    /// `artifacts` the slice selected by `offset`/`limit`.
    pub async fn search_artifacts(
        &self,
        search: &ArtifactSearch,
    ) -> Result<ArtifactSearchResults, RegistryError> {
        let url = self.endpoint(&["search", "artifacts"])?;
        self.fetch_json(self.client.get(url).query(search)).await
    }

    // ---- private helpers ----

    /// Append percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, RegistryError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                RegistryError::Validation(format!(
                    "registry URL cannot carry a path: '{}'",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send the request and turn any non-2xx status into a [`RegistryError`].
    async fn execute(&self, request: RequestBuilder) -> Result<Response, RegistryError> {
        let request = request.build()?;
        let method = request.method().clone();
        let path = request.url().path().to_owned();

        tracing::debug!(%method, %path, "Registry request");

        let response = match self.client.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(%method, %path, error = %e, "Registry unreachable");
                return Err(RegistryError::Transport(e));
            }
        };

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_else(|e| {
            tracing::debug!(%method, %path, error = %e, "Failed to read registry error body");
            "<unreadable body>".to_string()
        });
        let err = RegistryError::from_response(status, &body);
        tracing::warn!(%method, %path, status = status.as_u16(), error = %err, "Registry rejected request");
        Err(err)
    }

    /// Execute and decode a JSON body. A body that does not match `T` is a
    /// [`RegistryError::Server`] error.
    async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, RegistryError> {
        let response = self.execute(request).await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| RegistryError::malformed(status, e))
    }

    /// Drain a paginated listing.
    async fn fetch_all<P: Paged>(
        &self,
        url: Url,
        params: &[(&str, &str)],
    ) -> Result<Vec<P::Item>, RegistryError> {
        let mut items = Vec::new();
        let mut offset: u64 = 0;

        loop {
            let request = self
                .client
                .get(url.clone())
                .query(params)
                .query(&[("offset", offset), ("limit", u64::from(PAGE_SIZE))]);
            let page: P = self.fetch_json(request).await?;
            let total = page.total();
            let batch = page.into_items();
            let fetched = batch.len();
            items.extend(batch);

            if fetched < PAGE_SIZE as usize || items.len() as u64 >= total {
                break;
            }
            offset += fetched as u64;
        }

        Ok(items)
    }
}

/// A page of a listing endpoint.
trait Paged: DeserializeOwned {
    type Item;

    /// Total number of items across all pages.
    fn total(&self) -> u64;

    fn into_items(self) -> Vec<Self::Item>;
}

impl Paged for GroupSearchResults {
    type Item = GroupMetaData;

    fn total(&self) -> u64 {
        self.count
    }

    fn into_items(self) -> Vec<GroupMetaData> {
        self.groups
    }
}

impl Paged for VersionSearchResults {
    type Item = VersionMetaData;

    fn total(&self) -> u64 {
        self.count
    }

    fn into_items(self) -> Vec<VersionMetaData> {
        self.versions
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
