//! Client-side bookstore domain layer
//!
//! [`BookstoreClient`] is the context a UI adapter owns for the lifetime of a
//! session. It holds the live catalog and reservation set, persists both to a
//! local record store after every mutation, and mirrors them to the server
//! through best-effort bulk syncs. The server copy is never read back once the
//! client has local state.

pub mod catalog;
pub mod error;
pub mod reservations;
pub mod session;
pub mod sync;

use std::{path::PathBuf, sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tokio::task::JoinHandle;

use crate::{
    models::{
        book::{seed_books, Book, BookPatch, NewBook},
        reservation::Reservation,
        user::{User, UserType},
    },
    repository::{Collection, JsonStore},
};

pub use catalog::Catalog;
pub use error::{ClientError, Outcome};
pub use reservations::{ReservationManager, ReservationReceipt};
pub use session::Session;
pub use sync::{SyncClient, SyncError};

/// Source of the current time
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

pub fn system_clock() -> Clock {
    Arc::new(Utc::now)
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Local persistence directory
    pub data_dir: PathBuf,
    /// Server base URL; offline when absent
    pub server_url: Option<String>,
    pub session_hours: i64,
    pub retry_attempts: u32,
    pub retry_delay_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("client-data"),
            server_url: None,
            session_hours: session::SESSION_HOURS,
            retry_attempts: 3,
            retry_delay_ms: 100,
        }
    }
}

pub struct BookstoreClient {
    catalog: Catalog,
    reservations: ReservationManager,
    session: Session,
    store: JsonStore,
    sync: Option<SyncClient>,
    pending_push: Option<JoinHandle<()>>,
    clock: Clock,
}

impl BookstoreClient {
    pub async fn open(config: ClientConfig) -> Result<Self, ClientError> {
        Self::open_with_clock(config, system_clock()).await
    }

    /// Load local state. An empty local catalog is filled from the server,
    /// then from the demo catalog.
    pub async fn open_with_clock(config: ClientConfig, clock: Clock) -> Result<Self, ClientError> {
        let store = JsonStore::new(
            config.data_dir.clone(),
            config.retry_attempts,
            Duration::from_millis(config.retry_delay_ms),
        );
        store
            .init()
            .await
            .map_err(|e| ClientError::Storage(format!("{}: {}", store.dir().display(), e)))?;

        let sync = config.server_url.as_deref().map(|url| SyncClient::new(url));

        let mut books: Vec<Book> = store.read(Collection::Books).await;
        let mut seeded = false;
        if books.is_empty() {
            if let Some(sync) = &sync {
                match sync.fetch_books().await {
                    Ok(remote) => books = remote,
                    Err(e) => tracing::warn!("Could not load catalog from {}: {}", sync.base_url(), e),
                }
            }
        }
        if books.is_empty() {
            books = seed_books();
            seeded = true;
        }
        let reservations: Vec<Reservation> = store.read(Collection::Reservations).await;

        let client = Self {
            catalog: Catalog::new(books),
            reservations: ReservationManager::new(reservations),
            session: Session::new(config.session_hours),
            store,
            sync,
            pending_push: None,
            clock,
        };
        if seeded {
            client.persist().await;
        }
        Ok(client)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn reservations(&self) -> &ReservationManager {
        &self.reservations
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Log in through the server when one is configured and reachable,
    /// otherwise with a locally fabricated user
    pub async fn login(
        &mut self,
        email: &str,
        password: &str,
        user_type: Option<UserType>,
    ) -> Result<User, ClientError> {
        Session::check_credentials(email, password)?;
        let user_type = user_type.unwrap_or_default();
        let now = self.now();

        if let Some(sync) = &self.sync {
            match sync.login(email, password, user_type).await {
                Ok(response) => {
                    let user = User {
                        id: response.user.id,
                        email: response.user.email,
                        name: response.user.name,
                        user_type: response.user.user_type,
                        created_at: now,
                    };
                    self.session.start(&user, &response.token, user_type, now)?;
                    return Ok(user);
                }
                Err(e) if e.is_unreachable() => {
                    tracing::warn!("Server unreachable, logging in offline: {}", e);
                }
                Err(e) => return Err(ClientError::Remote(e.to_string())),
            }
        }

        self.session.login_offline(email, password, user_type, now)
    }

    pub fn logout(&mut self) {
        self.session.logout();
    }

    pub fn is_authenticated(&mut self) -> bool {
        let now = self.now();
        self.session.is_authenticated(now)
    }

    pub fn current_user(&mut self) -> Option<User> {
        let now = self.now();
        self.session.authenticated_user(now)
    }

    pub fn search(&self, query: &str, genre: Option<&str>) -> Vec<&Book> {
        self.catalog.search(query, genre)
    }

    pub fn book(&self, id: &str) -> Option<&Book> {
        self.catalog.get_by_id(id)
    }

    pub fn is_available(&self, book_id: &str) -> bool {
        self.reservations.is_available(&self.catalog, book_id)
    }

    pub async fn add_book(&mut self, input: NewBook) -> Result<Book, ClientError> {
        let book = self.catalog.add(input)?;
        self.persist().await;
        Ok(book)
    }

    pub async fn update_book(&mut self, id: &str, patch: BookPatch) -> Result<Book, ClientError> {
        let book = self.catalog.update(id, patch)?;
        self.persist().await;
        Ok(book)
    }

    /// Remove a book and cancel its active reservations. Returns the number
    /// of reservations cancelled. Reservations are kept while another book
    /// with the same id remains, since they now resolve to it.
    pub async fn delete_book(&mut self, id: &str) -> Result<usize, ClientError> {
        let now = self.now();
        let book = self
            .catalog
            .remove(id)
            .ok_or_else(|| ClientError::NotFound(format!("Book {}", id)))?;
        let cancelled = if self.catalog.get_by_id(id).is_some() {
            tracing::warn!("Book id {} is still in use; its reservations are kept", id);
            0
        } else {
            self.reservations.cancel_for_book(id, now)
        };
        tracing::info!("Deleted book {} ({} reservations cancelled)", book.id, cancelled);
        self.persist().await;
        Ok(cancelled)
    }

    /// Reserve a copy for the logged-in user, persist locally, then push to
    /// the server in the background
    pub async fn reserve(
        &mut self,
        book_id: &str,
        notes: Option<String>,
    ) -> Result<ReservationReceipt, ClientError> {
        let now = self.now();
        let user = self.session.authenticated_user(now);
        let receipt =
            self.reservations
                .reserve(&mut self.catalog, user.as_ref(), book_id, notes, now)?;
        self.persist().await;
        self.push();
        Ok(receipt)
    }

    pub async fn cancel(&mut self, reservation_id: &str) -> Result<(), ClientError> {
        let now = self.now();
        let user = self.session.authenticated_user(now);
        self.reservations
            .cancel(&mut self.catalog, user.as_ref(), reservation_id, now)?;
        self.persist().await;
        self.push();
        Ok(())
    }

    /// The logged-in user's reservations, newest first
    pub fn my_reservations(&mut self) -> Result<Vec<&Reservation>, ClientError> {
        let user = self.current_user().ok_or(ClientError::Unauthenticated)?;
        Ok(self.reservations.list_for_user(user.id))
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    /// Write both collections to local storage; failures are logged
    async fn persist(&self) {
        if !self.store.write(Collection::Books, self.catalog.books()).await {
            tracing::warn!("Failed to persist catalog locally");
        }
        if !self
            .store
            .write(Collection::Reservations, self.reservations.all())
            .await
        {
            tracing::warn!("Failed to persist reservations locally");
        }
    }

    /// Wait until every background push started so far has finished
    pub async fn wait_for_sync(&mut self) {
        if let Some(handle) = self.pending_push.take() {
            if let Err(e) = handle.await {
                tracing::warn!("Sync task failed: {}", e);
            }
        }
    }

    fn push(&mut self) {
        if let Some(sync) = &self.sync {
            let previous = self.pending_push.take();
            self.pending_push = Some(sync.spawn_push(
                self.catalog.books().to_vec(),
                self.reservations.all().to_vec(),
                previous,
            ));
        }
    }
}
