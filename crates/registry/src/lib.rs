//! Typed client for a schema registry's v3 REST API.
//!
//! Covers groups, artifact creation and metadata, version creation,
//! listing and content retrieval, artifact search and system info.
//! Every operation is a single awaited HTTP call (or a short series of
//! calls when draining a paginated listing) and reports failures as a
//! [`RegistryError`].

pub mod client;
pub mod error;
pub mod models;
pub mod search;
#[cfg(feature = "test-support")]
pub mod testing;

pub use client::{RegistryClient, DEFAULT_REGISTRY_URL, DEFAULT_TIMEOUT};
pub use error::RegistryError;
pub use models::{
    ArtifactMetaData, CreateArtifact, CreateArtifactResponse, CreateVersion, GroupMetaData,
    SystemInfo, VersionContent, VersionExpression, VersionMetaData, VersionState,
};
pub use search::{ArtifactSearch, ArtifactSortBy, SortOrder};
