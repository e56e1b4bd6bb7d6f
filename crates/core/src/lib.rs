//! Shared domain types for the librarian workspace.
//!
//! Holds the error taxonomy used by the HTTP service and the `Book`
//! model with its request validation.

pub mod book;
pub mod error;
pub mod types;
