//! In-memory book catalog

use validator::Validate;

use crate::models::book::{Book, BookPatch, NewBook};

use super::error::ClientError;

/// Genre filter value meaning "no restriction"
pub const ALL_GENRES: &str = "all";

/// Ordered set of books. Identifiers are not guaranteed unique: lookups
/// return the first match.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    books: Vec<Book>,
}

impl Catalog {
    pub fn new(books: Vec<Book>) -> Self {
        Self { books }
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Books whose title, author, genre or any tag contains `query`
    /// (case-insensitive), optionally restricted to genres containing `genre`.
    /// A blank query matches everything; insertion order is preserved.
    pub fn search(&self, query: &str, genre: Option<&str>) -> Vec<&Book> {
        let needle = query.trim().to_lowercase();
        let genre = genre
            .map(|g| g.trim().to_lowercase())
            .filter(|g| !g.is_empty() && g != ALL_GENRES);

        self.books
            .iter()
            .filter(|book| needle.is_empty() || book.matches(&needle))
            .filter(|book| {
                genre
                    .as_deref()
                    .map_or(true, |g| book.genre.to_lowercase().contains(g))
            })
            .collect()
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Book> {
        self.books.iter_mut().find(|book| book.id == id)
    }

    /// Whether the book exists and has a copy left
    pub fn is_available(&self, id: &str) -> bool {
        self.get_by_id(id).map_or(false, |book| book.available_copies > 0)
    }

    /// Append a new book built from form input
    pub fn add(&mut self, input: NewBook) -> Result<Book, ClientError> {
        let missing = input.missing_fields();
        if !missing.is_empty() {
            return Err(ClientError::Validation(
                missing.into_iter().map(String::from).collect(),
            ));
        }
        input.validate().map_err(|errors| {
            ClientError::Validation(errors.field_errors().keys().map(|k| k.to_string()).collect())
        })?;

        let book = input.into_book();
        if self.get_by_id(&book.id).is_some() {
            tracing::warn!("Book id {} already exists; lookups will return the first one", book.id);
        }
        self.books.push(book.clone());
        Ok(book)
    }

    pub fn update(&mut self, id: &str, patch: BookPatch) -> Result<Book, ClientError> {
        let book = self
            .get_mut(id)
            .ok_or_else(|| ClientError::NotFound(format!("Book {}", id)))?;
        book.apply(patch);
        Ok(book.clone())
    }

    /// Remove the first book with `id`
    pub fn remove(&mut self, id: &str) -> Option<Book> {
        let index = self.books.iter().position(|book| book.id == id)?;
        Some(self.books.remove(index))
    }

    /// Check-and-decrement of the available copy count in one step
    pub fn take_copy(&mut self, id: &str) -> Result<&Book, ClientError> {
        let book = self
            .get_mut(id)
            .ok_or_else(|| ClientError::NotFound(format!("Book {}", id)))?;
        if book.available_copies == 0 {
            return Err(ClientError::NoCopiesAvailable(book.title.clone()));
        }
        book.available_copies -= 1;
        Ok(&*book)
    }

    /// Give a copy back, never exceeding the total. Returns false when the
    /// book no longer exists.
    pub fn return_copy(&mut self, id: &str) -> bool {
        match self.get_mut(id) {
            Some(book) => {
                book.available_copies = (book.available_copies + 1).min(book.total_copies);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::book::seed_books;

    fn catalog() -> Catalog {
        Catalog::new(seed_books())
    }

    #[test]
    fn test_search_by_tag() {
        let catalog = catalog();
        let results = catalog.search("mystery", Some("all"));
        assert!(results.iter().any(|b| b.title == "The Silent Patient"));
        assert!(catalog.search("nonexistent", Some("all")).is_empty());
    }

    #[test]
    fn test_search_blank_query_matches_all_in_order() {
        let catalog = catalog();
        let results = catalog.search("   ", None);
        let ids: Vec<&str> = results.iter().map(|b| b.id.as_str()).collect();
        let expected: Vec<&str> = catalog.books().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_search_genre_is_substring_filter() {
        let catalog = catalog();
        let results = catalog.search("", Some("fiction"));
        let genres: Vec<&str> = results.iter().map(|b| b.genre.as_str()).collect();
        assert_eq!(genres, vec!["Science Fiction", "Fiction"]);

        let results = catalog.search("mystery", Some("MYSTERY"));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "the-silent-patient");
    }

    #[test]
    fn test_add_derives_id_and_copies() {
        let mut catalog = Catalog::default();
        let book = catalog
            .add(NewBook {
                title: Some("The Left Hand of Darkness".into()),
                author: Some("Ursula K. Le Guin".into()),
                genre: Some("Science Fiction".into()),
                copies: Some(crate::models::book::CopiesInput::Text("3".into())),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(book.id, "the-left-hand-of-darkness");
        assert_eq!((book.total_copies, book.available_copies), (3, 3));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_add_requires_title_and_author() {
        let mut catalog = Catalog::default();
        let err = catalog.add(NewBook::default()).unwrap_err();
        assert_eq!(err, ClientError::Validation(vec!["title".into(), "author".into()]));
    }

    #[test]
    fn test_duplicate_slug_lookup_returns_first() {
        let mut catalog = Catalog::default();
        for author in ["First", "Second"] {
            catalog
                .add(NewBook {
                    title: Some("Dune".into()),
                    author: Some(author.into()),
                    ..Default::default()
                })
                .unwrap();
        }
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get_by_id("dune").unwrap().author, "First");
    }

    #[test]
    fn test_take_copy_stops_at_zero() {
        let mut catalog = catalog();
        // Seeded with a single copy
        let id = "the-name-of-the-wind";
        assert!(catalog.take_copy(id).is_ok());
        assert!(matches!(catalog.take_copy(id), Err(ClientError::NoCopiesAvailable(_))));
        assert_eq!(catalog.get_by_id(id).unwrap().available_copies, 0);
        assert!(!catalog.is_available(id));
    }

    #[test]
    fn test_return_copy_never_exceeds_total() {
        let mut catalog = catalog();
        let id = "the-name-of-the-wind";
        assert!(catalog.return_copy(id));
        assert_eq!(catalog.get_by_id(id).unwrap().available_copies, 1);
        assert!(!catalog.return_copy("missing"));
    }

    #[test]
    fn test_update_unknown_book() {
        let mut catalog = catalog();
        let err = catalog.update("missing", BookPatch::default()).unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND");
    }
}
