use std::fmt::Display;

use chrono::SecondsFormat;
use librarian_registry::models::Timestamp;

/// Placeholder printed for fields the registry left out.
pub(crate) const MISSING: &str = "-";

pub(crate) fn text<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| v.to_string())
}

pub(crate) fn timestamp(value: Option<&Timestamp>) -> String {
    value.map_or_else(
        || MISSING.to_string(),
        |ts| ts.to_rfc3339_opts(SecondsFormat::Secs, true),
    )
}
