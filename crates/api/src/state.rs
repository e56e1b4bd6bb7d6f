use std::sync::Arc;

use crate::config::ServerConfig;
use crate::docs::ApiDocs;
use crate::store::BookStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Book catalog.
    pub store: Arc<BookStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// OpenAPI document loaded at startup.
    pub docs: Arc<ApiDocs>,
}

impl AppState {
    pub fn new(config: ServerConfig, docs: ApiDocs) -> Self {
        Self {
            store: Arc::new(BookStore::new()),
            config: Arc::new(config),
            docs: Arc::new(docs),
        }
    }
}
