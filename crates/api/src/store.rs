//! In-memory book storage.
//!
//! Books live for the lifetime of the process. Each operation takes the
//! lock only for the map access, so concurrent requests never observe a
//! half-applied write.

use std::collections::HashMap;

use librarian_core::book::Book;
use librarian_core::types::{new_book_id, BookId};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct BookStore {
    books: RwLock<HashMap<BookId, Book>>,
}

impl BookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `book` under a freshly generated id and return the id.
    pub async fn insert(&self, book: Book) -> BookId {
        let id = new_book_id();
        self.books.write().await.insert(id.clone(), book);
        id
    }

    pub async fn get(&self, id: &str) -> Option<Book> {
        self.books.read().await.get(id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.books.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn book(title: &str) -> Book {
        Book {
            title: title.into(),
            author: "Someone".into(),
        }
    }

    #[tokio::test]
    async fn insert_then_get() {
        let store = BookStore::new();
        let id = store.insert(book("Dune")).await;

        assert_eq!(store.get(&id).await, Some(book("Dune")));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn unknown_id_is_none() {
        let store = BookStore::new();
        assert!(store.is_empty().await);
        assert_eq!(store.get("missing").await, None);
    }

    #[tokio::test]
    async fn identical_books_get_distinct_ids() {
        let store = BookStore::new();
        let a = store.insert(book("Dune")).await;
        let b = store.insert(book("Dune")).await;

        assert_ne!(a, b);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn concurrent_inserts_are_all_kept() {
        let store = Arc::new(BookStore::new());
        let handles: Vec<_> = (0..32)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.insert(book(&format!("Book {i}"))).await })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }

        assert_eq!(store.len().await, 32);
        for (i, id) in ids.iter().enumerate() {
            assert_eq!(store.get(id).await, Some(book(&format!("Book {i}"))));
        }
    }
}
