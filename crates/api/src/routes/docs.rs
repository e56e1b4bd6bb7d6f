use axum::Router;
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDocs;
use crate::state::AppState;

/// Path the Swagger UI is mounted at.
pub const DOCS_UI_PATH: &str = "/api-docs";

/// Path the raw OpenAPI document is served from, as JSON.
pub const DOCS_JSON_PATH: &str = "/openapi.json";

/// Mount the Swagger UI and the document it renders.
///
/// `GET /api-docs` redirects to `/api-docs/`, which serves the UI.
pub fn router(docs: &ApiDocs) -> Router<AppState> {
    SwaggerUi::new(DOCS_UI_PATH)
        .external_url_unchecked(DOCS_JSON_PATH, docs.document().clone())
        .into()
}
