//! Catalog service (server-side mirror of the book collection)

use crate::{
    error::{AppError, AppResult},
    models::book::{seed_books, Book, NewBook},
    repository::Repository,
};
use validator::Validate;

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list_books(&self) -> Vec<Book> {
        self.repository.books.list().await
    }

    /// Create a book; title and author are required
    pub async fn create_book(&self, input: NewBook) -> AppResult<Book> {
        let missing = input.missing_fields();
        if !missing.is_empty() {
            return Err(AppError::missing_fields(missing));
        }
        input.validate()?;

        let book = input.into_book();
        tracing::info!("Adding book {} ({})", book.id, book.title);
        self.repository.books.insert(book).await
    }

    /// Replace the mirrored catalog with the client's full copy
    pub async fn sync_books(&self, books: Vec<Book>) -> AppResult<usize> {
        self.repository.books.replace_all(&books).await?;
        tracing::info!("Synced {} books", books.len());
        Ok(books.len())
    }

    /// Write the demo catalog when no books are stored yet
    pub async fn seed_if_empty(&self) -> AppResult<bool> {
        if self.repository.books.count().await > 0 {
            return Ok(false);
        }
        let books = seed_books();
        self.repository.books.replace_all(&books).await?;
        tracing::info!("Seeded catalog with {} books", books.len());
        Ok(true)
    }
}
