//! Book catalog domain model and input validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;

/// Error message returned when a create request lacks a title or author.
pub const MSG_TITLE_AUTHOR_REQUIRED: &str = "Title and author are required";

/// A stored book. The identifier lives in the store key, not in the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub author: String,
}

/// Request body for `POST /books`.
///
/// Both fields are optional at the deserialisation layer so that a missing
/// field surfaces as a validation error instead of a body parse failure.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateBook {
    #[validate(required, length(min = 1))]
    pub title: Option<String>,
    #[validate(required, length(min = 1))]
    pub author: Option<String>,
}

impl CreateBook {
    /// Validate the request and convert it into a [`Book`].
    ///
    /// Fails with [`CoreError::Validation`] when either field is missing or
    /// empty.
    pub fn into_book(self) -> Result<Book, CoreError> {
        self.validate()
            .map_err(|_| CoreError::Validation(MSG_TITLE_AUTHOR_REQUIRED.to_string()))?;

        match (self.title, self.author) {
            (Some(title), Some(author)) => Ok(Book { title, author }),
            _ => Err(CoreError::Validation(MSG_TITLE_AUTHOR_REQUIRED.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
