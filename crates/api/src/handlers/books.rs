//! Handlers for the `/books` resource.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use librarian_core::book::{Book, CreateBook};
use librarian_core::error::CoreError;
use librarian_core::types::BookId;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Message for bodies that are not JSON or do not match the book shape.
pub const MSG_INVALID_BODY: &str = "Invalid request body";

/// Response body for `POST /books`.
#[derive(Debug, Serialize)]
pub struct BookCreated {
    pub id: BookId,
}

/// POST /books
///
/// Store a book and return its generated id with 201 Created. A body that
/// cannot be parsed is a `BAD_REQUEST`; a missing or empty title or author
/// is a `VALIDATION_ERROR`.
pub async fn create_book(
    State(state): State<AppState>,
    body: Result<Json<CreateBook>, JsonRejection>,
) -> AppResult<(StatusCode, Json<BookCreated>)> {
    let Json(input) = body.map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "Rejected book body");
        AppError::BadRequest(MSG_INVALID_BODY.to_string())
    })?;

    let book = input.into_book()?;
    let id = state.store.insert(book).await;
    tracing::info!(book_id = %id, "Book created");

    Ok((StatusCode::CREATED, Json(BookCreated { id })))
}

/// GET /books/{id}
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<BookId>,
) -> AppResult<Json<Book>> {
    state
        .store
        .get(&id)
        .await
        .map(Json)
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Book", id }))
}
