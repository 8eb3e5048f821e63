use std::sync::Arc;

use tokio::sync::RwLock;

use super::clock::Clock;
use super::error::BookError;
use super::models::{Book, BookDraft, BookId};
use super::query::{list_books, BookQuery};
use super::store::BookStore;
use super::validation::validate_book;

/// Catalog operations over a shared store.
///
/// Each mutation validates and writes under a single write lock, so two
/// concurrent creates with the same ISBN cannot both pass the uniqueness check.
#[derive(Debug, Clone)]
pub struct BookCatalog {
    store: Arc<RwLock<Box<dyn BookStore>>>,
    clock: Arc<dyn Clock>,
}

impl BookCatalog {
    pub fn new(store: impl BookStore + 'static, clock: impl Clock + 'static) -> Self {
        let store: Box<dyn BookStore> = Box::new(store);
        Self {
            store: Arc::new(RwLock::new(store)),
            clock: Arc::new(clock),
        }
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.all().len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn list(&self, query: &BookQuery) -> Vec<Book> {
        let store = self.store.read().await;
        list_books(store.all(), query)
    }

    pub async fn get(&self, id: BookId) -> Result<Book, BookError> {
        self.store
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or(BookError::NotFound(id))
    }

    pub async fn create(&self, draft: &BookDraft) -> Result<Book, BookError> {
        let mut store = self.store.write().await;

        let fields = validate_book(draft, store.all(), None, self.clock.now()).inspect_err(|err| {
            tracing::warn!(field = ?err.field, kind = ?err.kind, "book rejected on create");
        })?;

        let book = store.add(fields);
        tracing::info!(book_id = book.id, title = %book.title, "book created");
        Ok(book)
    }

    /// Replace every field of an existing book. Unknown ids are reported
    /// before any validation runs.
    pub async fn update(&self, id: BookId, draft: &BookDraft) -> Result<Book, BookError> {
        let mut store = self.store.write().await;

        if store.get(id).is_none() {
            return Err(BookError::NotFound(id));
        }

        let fields =
            validate_book(draft, store.all(), Some(id), self.clock.now()).inspect_err(|err| {
                tracing::warn!(
                    book_id = id,
                    field = ?err.field,
                    kind = ?err.kind,
                    "book rejected on update"
                );
            })?;

        let book = store.update(id, fields).ok_or(BookError::NotFound(id))?;
        tracing::info!(book_id = id, "book updated");
        Ok(book)
    }

    pub async fn delete(&self, id: BookId) -> Result<(), BookError> {
        if !self.store.write().await.delete(id) {
            return Err(BookError::NotFound(id));
        }
        tracing::info!(book_id = id, "book deleted");
        Ok(())
    }
}
