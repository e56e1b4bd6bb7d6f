use axum::routing::{get, post};
use axum::Router;

use crate::handlers::books;
use crate::state::AppState;

/// Mount book routes.
///
/// ```text
/// POST /books          create_book
/// GET  /books/{id}     get_book
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/books", post(books::create_book))
        .route("/books/{id}", get(books::get_book))
}
