//! Books repository

use crate::{error::AppResult, models::book::Book};

use super::{persisted, Collection, JsonStore};

#[derive(Clone)]
pub struct BooksRepository {
    store: JsonStore,
}

impl BooksRepository {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Vec<Book> {
        self.store.read(Collection::Books).await
    }

    pub async fn count(&self) -> usize {
        self.list().await.len()
    }

    /// Append a book. Identifier uniqueness is not checked.
    pub async fn insert(&self, book: Book) -> AppResult<Book> {
        let mut books = self.list().await;
        books.push(book.clone());
        persisted(self.store.write(Collection::Books, &books).await, Collection::Books)?;
        Ok(book)
    }

    /// Overwrite the whole collection
    pub async fn replace_all(&self, books: &[Book]) -> AppResult<()> {
        persisted(self.store.write(Collection::Books, books).await, Collection::Books)
    }
}
