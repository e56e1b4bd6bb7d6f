/// Book identifiers are UUID v4 values rendered as hyphenated strings.
pub type BookId = String;

/// Generate a fresh, unique book identifier.
pub fn new_book_id() -> BookId {
    uuid::Uuid::new_v4().to_string()
}
