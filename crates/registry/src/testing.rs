//! In-process fake registry for tests.
//!
//! [`FakeRegistry`] serves the subset of `/apis/registry/v3` that
//! [`RegistryClient`] uses from an axum router bound to an ephemeral
//! localhost port. State lives in memory and dies with the value.
//! Timestamps come from a fake clock that advances one second per write,
//! so ordering by `createdOn` is deterministic.

use std::cmp::Ordering;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::extract::{Path, Query, Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tokio::task::JoinHandle;

use crate::client::RegistryClient;
use crate::models::{
    ArtifactMetaData, ArtifactSearchResults, CreateArtifact, CreateArtifactResponse,
    CreateVersion, GroupMetaData, GroupSearchResults, SystemInfo, VersionMetaData,
    VersionSearchResults, VersionState,
};
use crate::search::{ArtifactSearch, ArtifactSortBy, SortOrder};

/// API root every route is mounted under.
const API_ROOT: &str = "/apis/registry/v3";

/// Server-side page size when a listing request sets no `limit`.
const DEFAULT_LIMIT: usize = 20;

/// Fake clock origin: 2024-01-01T00:00:00Z.
const CLOCK_ORIGIN_SECS: i64 = 1_704_067_200;

/// A running fake registry. Dropping it stops the server task.
pub struct FakeRegistry {
    base_url: String,
    state: Shared,
    handle: JoinHandle<()>,
}

impl FakeRegistry {
    /// Bind to `127.0.0.1:0` and start serving.
    pub async fn start() -> std::io::Result<Self> {
        let state: Shared = Arc::new(Mutex::new(FakeState::default()));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let app = router(Arc::clone(&state));
        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "Fake registry stopped");
            }
        });

        Ok(Self {
            base_url: format!("http://{addr}{API_ROOT}/"),
            state,
            handle,
        })
    }

    /// API root URL, e.g. `http://127.0.0.1:41234/apis/registry/v3/`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// A client pointed at this fake.
    pub fn client(&self) -> RegistryClient {
        RegistryClient::new(&self.base_url)
            .unwrap_or_else(|e| panic!("fake registry URL must be valid: {e}"))
    }

    /// Register a group without creating an artifact in it.
    pub fn add_group(&self, group_id: &str, description: Option<&str>) {
        let mut state = lock(&self.state);
        let now = state.tick();
        state.ensure_group(group_id, now);
        if let Some(group) = state.groups.iter_mut().find(|g| g.group_id == group_id) {
            group.description = description.map(str::to_string);
        }
    }

    /// Answer every subsequent request with `status` and a problem body.
    /// `None` restores normal behaviour.
    pub fn fail_with(&self, status: Option<StatusCode>) {
        lock(&self.state).forced_status = status;
    }

    /// Replace the `GET /system/info` body with arbitrary JSON.
    pub fn set_system_info(&self, body: serde_json::Value) {
        lock(&self.state).system_info = Some(body);
    }

    /// Number of requests the fake has received.
    pub fn request_count(&self) -> usize {
        lock(&self.state).requests
    }
}

impl Drop for FakeRegistry {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

type Shared = Arc<Mutex<FakeState>>;

#[derive(Default)]
struct FakeState {
    groups: Vec<GroupMetaData>,
    artifacts: Vec<StoredArtifact>,
    next_global_id: i64,
    clock: i64,
    forced_status: Option<StatusCode>,
    system_info: Option<serde_json::Value>,
    requests: usize,
}

struct StoredArtifact {
    meta: ArtifactMetaData,
    versions: Vec<StoredVersion>,
}

struct StoredVersion {
    meta: VersionMetaData,
    content: String,
    content_type: String,
}

impl FakeState {
    fn tick(&mut self) -> DateTime<Utc> {
        self.clock += 1;
        DateTime::<Utc>::UNIX_EPOCH + chrono::Duration::seconds(CLOCK_ORIGIN_SECS + self.clock)
    }

    fn ensure_group(&mut self, group_id: &str, now: DateTime<Utc>) {
        if !self.groups.iter().any(|g| g.group_id == group_id) {
            self.groups.push(GroupMetaData {
                group_id: group_id.to_string(),
                description: None,
                owner: None,
                created_on: Some(now),
                modified_on: Some(now),
            });
        }
    }

    fn artifact(&self, group_id: &str, artifact_id: &str) -> Option<&StoredArtifact> {
        self.artifacts
            .iter()
            .find(|a| a.meta.group() == group_id && a.meta.artifact_id == artifact_id)
    }

    fn artifact_mut(&mut self, group_id: &str, artifact_id: &str) -> Option<&mut StoredArtifact> {
        self.artifacts
            .iter_mut()
            .find(|a| a.meta.group() == group_id && a.meta.artifact_id == artifact_id)
    }

    fn new_version(
        &mut self,
        group_id: &str,
        artifact: &ArtifactMetaData,
        request: CreateVersion,
        now: DateTime<Utc>,
    ) -> StoredVersion {
        self.next_global_id += 1;
        StoredVersion {
            meta: VersionMetaData {
                version: request.version,
                group_id: Some(group_id.to_string()),
                artifact_id: Some(artifact.artifact_id.clone()),
                artifact_type: Some(artifact.artifact_type.clone()),
                global_id: Some(self.next_global_id),
                content_id: Some(self.next_global_id),
                state: Some(VersionState::Enabled),
                name: request.name,
                description: request.description,
                created_on: Some(now),
            },
            content: request.content.content,
            content_type: request.content.content_type,
        }
    }
}

fn lock(state: &Shared) -> MutexGuard<'_, FakeState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// RFC 7807 error response.
struct Problem {
    status: StatusCode,
    detail: String,
}

impl Problem {
    fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "status": self.status.as_u16(),
            "title": self.status.canonical_reason().unwrap_or("Error"),
            "detail": self.detail,
        });
        (self.status, Json(body)).into_response()
    }
}

type FakeResult<T> = Result<T, Problem>;

// ---------------------------------------------------------------------------
// Routes
// ---------------------------------------------------------------------------

fn router(state: Shared) -> Router {
    let api = Router::new()
        .route("/system/info", get(system_info))
        .route("/groups", get(list_groups))
        .route(
            "/groups/{group_id}/artifacts",
            axum::routing::post(create_artifact),
        )
        .route(
            "/groups/{group_id}/artifacts/{artifact_id}",
            get(get_artifact),
        )
        .route(
            "/groups/{group_id}/artifacts/{artifact_id}/versions",
            get(list_versions).post(create_version),
        )
        .route(
            "/groups/{group_id}/artifacts/{artifact_id}/versions/{expr}/content",
            get(version_content),
        )
        .route("/search/artifacts", get(search_artifacts));

    Router::new()
        .nest(API_ROOT, api)
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            count_and_fail,
        ))
        .with_state(state)
}

/// Count requests and apply a forced failure, if one is set.
async fn count_and_fail(State(state): State<Shared>, request: Request, next: Next) -> Response {
    let forced = {
        let mut guard = lock(&state);
        guard.requests += 1;
        guard.forced_status
    };

    match forced {
        Some(status) => Problem::new(status, "forced failure").into_response(),
        None => next.run(request).await,
    }
}

#[derive(Debug, Default, Deserialize)]
struct PageParams {
    #[serde(default)]
    offset: Option<usize>,
    #[serde(default)]
    limit: Option<usize>,
    #[serde(default)]
    order: Option<SortOrder>,
}

fn page<T: Clone>(items: &[T], offset: Option<usize>, limit: Option<usize>) -> Vec<T> {
    items
        .iter()
        .skip(offset.unwrap_or(0))
        .take(limit.unwrap_or(DEFAULT_LIMIT))
        .cloned()
        .collect()
}

async fn system_info(State(state): State<Shared>) -> Response {
    if let Some(body) = lock(&state).system_info.clone() {
        return Json(body).into_response();
    }

    Json(SystemInfo {
        name: Some("Fake Registry".into()),
        description: Some("In-memory registry for tests".into()),
        version: Some("3.0.0-fake".into()),
        built_on: Some(DateTime::<Utc>::UNIX_EPOCH + chrono::Duration::seconds(CLOCK_ORIGIN_SECS)),
    })
    .into_response()
}

async fn list_groups(
    State(state): State<Shared>,
    Query(params): Query<PageParams>,
) -> Json<GroupSearchResults> {
    let state = lock(&state);
    Json(GroupSearchResults {
        count: state.groups.len() as u64,
        groups: page(&state.groups, params.offset, params.limit),
    })
}

async fn create_artifact(
    State(state): State<Shared>,
    Path(group_id): Path<String>,
    Json(request): Json<CreateArtifact>,
) -> FakeResult<Json<CreateArtifactResponse>> {
    if request.artifact_id.trim().is_empty() {
        return Err(Problem::new(StatusCode::BAD_REQUEST, "artifactId is required"));
    }

    let mut state = lock(&state);
    if state.artifact(&group_id, &request.artifact_id).is_some() {
        return Err(Problem::new(
            StatusCode::CONFLICT,
            format!(
                "An artifact with ID '{}' in group '{group_id}' already exists.",
                request.artifact_id
            ),
        ));
    }

    let now = state.tick();
    state.ensure_group(&group_id, now);

    let meta = ArtifactMetaData {
        group_id: Some(group_id.clone()),
        artifact_id: request.artifact_id,
        artifact_type: request.artifact_type,
        name: request.name,
        description: request.description,
        owner: None,
        created_on: Some(now),
        modified_on: Some(now),
    };
    let version = state.new_version(&group_id, &meta, request.first_version, now);
    let version_meta = version.meta.clone();

    state.artifacts.push(StoredArtifact {
        meta: meta.clone(),
        versions: vec![version],
    });

    Ok(Json(CreateArtifactResponse {
        artifact: meta,
        version: Some(version_meta),
    }))
}

async fn get_artifact(
    State(state): State<Shared>,
    Path((group_id, artifact_id)): Path<(String, String)>,
) -> FakeResult<Json<ArtifactMetaData>> {
    let state = lock(&state);
    state
        .artifact(&group_id, &artifact_id)
        .map(|a| Json(a.meta.clone()))
        .ok_or_else(|| artifact_not_found(&group_id, &artifact_id))
}

async fn list_versions(
    State(state): State<Shared>,
    Path((group_id, artifact_id)): Path<(String, String)>,
    Query(params): Query<PageParams>,
) -> FakeResult<Json<VersionSearchResults>> {
    let state = lock(&state);
    let artifact = state
        .artifact(&group_id, &artifact_id)
        .ok_or_else(|| artifact_not_found(&group_id, &artifact_id))?;

    let mut versions: Vec<VersionMetaData> =
        artifact.versions.iter().map(|v| v.meta.clone()).collect();
    if params.order == Some(SortOrder::Desc) {
        versions.reverse();
    }

    Ok(Json(VersionSearchResults {
        count: versions.len() as u64,
        versions: page(&versions, params.offset, params.limit),
    }))
}

async fn create_version(
    State(state): State<Shared>,
    Path((group_id, artifact_id)): Path<(String, String)>,
    Json(request): Json<CreateVersion>,
) -> FakeResult<Json<VersionMetaData>> {
    let mut state = lock(&state);
    let meta = state
        .artifact(&group_id, &artifact_id)
        .ok_or_else(|| artifact_not_found(&group_id, &artifact_id))?
        .meta
        .clone();

    let duplicate = state
        .artifact(&group_id, &artifact_id)
        .is_some_and(|a| a.versions.iter().any(|v| v.meta.version == request.version));
    if duplicate {
        return Err(Problem::new(
            StatusCode::CONFLICT,
            format!("Version '{}' already exists.", request.version),
        ));
    }

    let now = state.tick();
    let version = state.new_version(&group_id, &meta, request, now);
    let created = version.meta.clone();

    if let Some(artifact) = state.artifact_mut(&group_id, &artifact_id) {
        artifact.meta.modified_on = Some(now);
        artifact.versions.push(version);
    }

    Ok(Json(created))
}

async fn version_content(
    State(state): State<Shared>,
    Path((group_id, artifact_id, expr)): Path<(String, String, String)>,
) -> FakeResult<Response> {
    let state = lock(&state);
    let artifact = state
        .artifact(&group_id, &artifact_id)
        .ok_or_else(|| artifact_not_found(&group_id, &artifact_id))?;

    let version = if expr == "branch=latest" {
        artifact.versions.last()
    } else {
        artifact.versions.iter().find(|v| v.meta.version == expr)
    }
    .ok_or_else(|| {
        Problem::new(
            StatusCode::NOT_FOUND,
            format!("No version '{expr}' found for artifact with ID '{artifact_id}' in group '{group_id}'."),
        )
    })?;

    Ok((
        [(header::CONTENT_TYPE, version.content_type.clone())],
        version.content.clone(),
    )
        .into_response())
}

async fn search_artifacts(
    State(state): State<Shared>,
    Query(search): Query<ArtifactSearch>,
) -> Json<ArtifactSearchResults> {
    let state = lock(&state);

    let needle = search.name.as_deref().map(str::to_lowercase);
    let mut hits: Vec<ArtifactMetaData> = state
        .artifacts
        .iter()
        .map(|a| &a.meta)
        .filter(|meta| {
            needle.as_deref().map_or(true, |n| {
                meta.name
                    .as_deref()
                    .is_some_and(|name| name.to_lowercase().contains(n))
            })
        })
        .filter(|meta| {
            search
                .artifact_type
                .as_deref()
                .map_or(true, |t| meta.artifact_type == t)
        })
        .filter(|meta| search.group_id.as_deref().map_or(true, |g| meta.group() == g))
        .cloned()
        .collect();

    let sort_by = search.order_by.unwrap_or(ArtifactSortBy::Name);
    hits.sort_by(|a, b| compare(a, b, sort_by));
    if search.order == Some(SortOrder::Desc) {
        hits.reverse();
    }

    let offset = search.offset.map(|o| o as usize);
    let limit = search.limit.map(|l| l as usize);
    Json(ArtifactSearchResults {
        count: hits.len() as u64,
        artifacts: page(&hits, offset, limit),
    })
}

fn compare(a: &ArtifactMetaData, b: &ArtifactMetaData, sort_by: ArtifactSortBy) -> Ordering {
    match sort_by {
        ArtifactSortBy::GroupId => a.group().cmp(b.group()),
        ArtifactSortBy::ArtifactId => a.artifact_id.cmp(&b.artifact_id),
        ArtifactSortBy::Name => a.name.cmp(&b.name),
        ArtifactSortBy::ArtifactType => a.artifact_type.cmp(&b.artifact_type),
        ArtifactSortBy::CreatedOn => a.created_on.cmp(&b.created_on),
        ArtifactSortBy::ModifiedOn => a.modified_on.cmp(&b.modified_on),
    }
}

fn artifact_not_found(group_id: &str, artifact_id: &str) -> Problem {
    Problem::new(
        StatusCode::NOT_FOUND,
        format!("No artifact with ID '{artifact_id}' in group '{group_id}' was found."),
    )
}
