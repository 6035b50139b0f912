//! Repository layer over the JSON record store

pub mod books;
pub mod orders;
pub mod reservations;
pub mod store;
pub mod users;

pub use store::{Collection, JsonStore};

use crate::error::{AppError, AppResult};

/// Main repository struct holding the record store
#[derive(Clone)]
pub struct Repository {
    pub store: JsonStore,
    pub books: books::BooksRepository,
    pub users: users::UsersRepository,
    pub orders: orders::OrdersRepository,
    pub reservations: reservations::ReservationsRepository,
}

impl Repository {
    /// Create a new repository over the given store
    pub fn new(store: JsonStore) -> Self {
        Self {
            books: books::BooksRepository::new(store.clone()),
            users: users::UsersRepository::new(store.clone()),
            orders: orders::OrdersRepository::new(store.clone()),
            reservations: reservations::ReservationsRepository::new(store.clone()),
            store,
        }
    }
}

/// Map the store's boolean write result onto a store failure
pub(crate) fn persisted(ok: bool, collection: Collection) -> AppResult<()> {
    if ok {
        Ok(())
    } else {
        Err(AppError::Store(format!("Failed to save {}", collection)))
    }
}
