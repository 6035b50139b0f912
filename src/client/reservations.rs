//! Reservation manager
//!
//! A reservation is `active` until cancelled; `cancelled` is terminal. Every
//! mutation takes the catalog by `&mut`, so the availability check and the
//! copy decrement happen under exclusive access. Callers sharing one manager
//! across tasks wrap catalog and manager together behind a single lock.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{reservation::Reservation, user::User};

use super::{catalog::Catalog, error::ClientError};

/// Returned on a successful reservation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationReceipt {
    pub reservation_id: String,
    pub expiry_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct ReservationManager {
    reservations: Vec<Reservation>,
}

impl ReservationManager {
    pub fn new(reservations: Vec<Reservation>) -> Self {
        Self { reservations }
    }

    pub fn all(&self) -> &[Reservation] {
        &self.reservations
    }

    pub fn get(&self, id: &str) -> Option<&Reservation> {
        self.reservations.iter().find(|r| r.id == id)
    }

    /// Reserve one copy of `book_id` for `user`
    pub fn reserve(
        &mut self,
        catalog: &mut Catalog,
        user: Option<&User>,
        book_id: &str,
        notes: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<ReservationReceipt, ClientError> {
        let user = user.ok_or(ClientError::Unauthenticated)?;
        let book = catalog
            .get_by_id(book_id)
            .ok_or_else(|| ClientError::NotFound(format!("Book {}", book_id)))?;
        if book.available_copies == 0 {
            return Err(ClientError::NoCopiesAvailable(book.title.clone()));
        }
        if self.has_active(book_id, user.id) {
            return Err(ClientError::DuplicateReservation(book.title.clone()));
        }

        let book = catalog.take_copy(book_id)?;
        let reservation = Reservation::open(book, user, notes, now);
        let receipt = ReservationReceipt {
            reservation_id: reservation.id.clone(),
            expiry_date: reservation.expiry_date,
        };

        tracing::info!(
            "User {} reserved {} until {}",
            user.email,
            reservation.book_id,
            reservation.expiry_date
        );
        self.reservations.push(reservation);
        Ok(receipt)
    }

    /// Cancel an active reservation owned by `user` and return its copy
    pub fn cancel(
        &mut self,
        catalog: &mut Catalog,
        user: Option<&User>,
        reservation_id: &str,
        now: DateTime<Utc>,
    ) -> Result<(), ClientError> {
        let user = user.ok_or(ClientError::Unauthenticated)?;
        let reservation = self
            .reservations
            .iter_mut()
            .find(|r| r.id == reservation_id)
            .ok_or_else(|| ClientError::NotFound(format!("Reservation {}", reservation_id)))?;
        if reservation.user_id != user.id {
            return Err(ClientError::Unauthorized);
        }
        if !reservation.is_active() {
            return Err(ClientError::AlreadyCancelled(reservation_id.to_string()));
        }

        reservation.cancel(now);
        if !catalog.return_copy(&reservation.book_id) {
            tracing::debug!("Cancelled reservation {} refers to a removed book", reservation_id);
        }
        Ok(())
    }

    /// Cancel every active reservation on a book that is being removed.
    /// Returns how many were cancelled.
    pub fn cancel_for_book(&mut self, book_id: &str, now: DateTime<Utc>) -> usize {
        let mut cancelled = 0;
        for reservation in self
            .reservations
            .iter_mut()
            .filter(|r| r.book_id == book_id && r.is_active())
        {
            reservation.cancel(now);
            cancelled += 1;
        }
        cancelled
    }

    /// All reservations of a user, newest first
    pub fn list_for_user(&self, user_id: i64) -> Vec<&Reservation> {
        let mut mine: Vec<&Reservation> = self
            .reservations
            .iter()
            .filter(|r| r.user_id == user_id)
            .collect();
        mine.sort_by(|a, b| b.reservation_date.cmp(&a.reservation_date));
        mine
    }

    pub fn is_available(&self, catalog: &Catalog, book_id: &str) -> bool {
        catalog.is_available(book_id)
    }

    fn has_active(&self, book_id: &str, user_id: i64) -> bool {
        self.reservations
            .iter()
            .any(|r| r.book_id == book_id && r.user_id == user_id && r.is_active())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{book::seed_books, reservation::ReservationStatus, user::UserType};
    use chrono::{Duration, TimeZone};
    use std::sync::Arc;
    use tokio::sync::Mutex;

    const PATIENT: &str = "the-silent-patient";
    const WIND: &str = "the-name-of-the-wind";

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    fn user(email: &str, id: i64) -> User {
        let mut user = User::from_email(email, UserType::Customer, now());
        user.id = id;
        user
    }

    fn setup() -> (Catalog, ReservationManager) {
        (Catalog::new(seed_books()), ReservationManager::default())
    }

    fn available(catalog: &Catalog, id: &str) -> u32 {
        catalog.get_by_id(id).unwrap().available_copies
    }

    #[test]
    fn test_reserve_decrements_and_sets_expiry() {
        let (mut catalog, mut manager) = setup();
        let alice = user("alice@example.com", 1);
        let before = available(&catalog, PATIENT);

        let receipt = manager
            .reserve(&mut catalog, Some(&alice), PATIENT, None, now())
            .unwrap();

        assert_eq!(available(&catalog, PATIENT), before - 1);
        assert_eq!(manager.all().len(), 1);
        let reservation = manager.get(&receipt.reservation_id).unwrap();
        assert_eq!(reservation.status, ReservationStatus::Active);
        assert_eq!(reservation.reservation_date, now());
        assert_eq!(
            receipt.expiry_date,
            Utc.with_ymd_and_hms(2024, 1, 8, 0, 0, 0).unwrap()
        );
        assert_eq!(reservation.user_name, "alice");
        assert_eq!(reservation.book_title, "The Silent Patient");
    }

    #[test]
    fn test_reserve_requires_user() {
        let (mut catalog, mut manager) = setup();
        let err = manager.reserve(&mut catalog, None, PATIENT, None, now()).unwrap_err();
        assert_eq!(err, ClientError::Unauthenticated);
    }

    #[test]
    fn test_reserve_unknown_book() {
        let (mut catalog, mut manager) = setup();
        let alice = user("alice@example.com", 1);
        let err = manager
            .reserve(&mut catalog, Some(&alice), "missing", None, now())
            .unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND");
    }

    #[test]
    fn test_duplicate_active_reservation_rejected() {
        let (mut catalog, mut manager) = setup();
        let alice = user("alice@example.com", 1);
        manager
            .reserve(&mut catalog, Some(&alice), PATIENT, None, now())
            .unwrap();
        let before = available(&catalog, PATIENT);

        let err = manager
            .reserve(&mut catalog, Some(&alice), PATIENT, None, now())
            .unwrap_err();

        assert!(matches!(err, ClientError::DuplicateReservation(_)));
        assert_eq!(available(&catalog, PATIENT), before);
        assert_eq!(manager.all().len(), 1);
    }

    #[test]
    fn test_reserve_again_after_cancel() {
        let (mut catalog, mut manager) = setup();
        let alice = user("alice@example.com", 1);
        let first = manager
            .reserve(&mut catalog, Some(&alice), PATIENT, None, now())
            .unwrap();
        manager
            .cancel(&mut catalog, Some(&alice), &first.reservation_id, now())
            .unwrap();

        assert!(manager
            .reserve(&mut catalog, Some(&alice), PATIENT, None, now())
            .is_ok());
    }

    #[test]
    fn test_no_copies_available() {
        let (mut catalog, mut manager) = setup();
        let alice = user("alice@example.com", 1);
        let bob = user("bob@example.com", 2);
        manager.reserve(&mut catalog, Some(&alice), WIND, None, now()).unwrap();

        let err = manager
            .reserve(&mut catalog, Some(&bob), WIND, None, now())
            .unwrap_err();
        assert!(matches!(err, ClientError::NoCopiesAvailable(_)));
        assert!(!manager.is_available(&catalog, WIND));
    }

    #[test]
    fn test_cancel_returns_copy_once() {
        let (mut catalog, mut manager) = setup();
        let alice = user("alice@example.com", 1);
        let receipt = manager
            .reserve(&mut catalog, Some(&alice), PATIENT, None, now())
            .unwrap();
        let reserved = available(&catalog, PATIENT);

        let later = now() + Duration::hours(2);
        manager
            .cancel(&mut catalog, Some(&alice), &receipt.reservation_id, later)
            .unwrap();
        assert_eq!(available(&catalog, PATIENT), reserved + 1);
        let reservation = manager.get(&receipt.reservation_id).unwrap();
        assert_eq!(reservation.status, ReservationStatus::Cancelled);
        assert_eq!(reservation.cancelled_date, Some(later));

        let err = manager
            .cancel(&mut catalog, Some(&alice), &receipt.reservation_id, later)
            .unwrap_err();
        assert!(matches!(err, ClientError::AlreadyCancelled(_)));
        assert_eq!(available(&catalog, PATIENT), reserved + 1);
    }

    #[test]
    fn test_cancel_by_other_user_rejected() {
        let (mut catalog, mut manager) = setup();
        let alice = user("alice@example.com", 1);
        let bob = user("bob@example.com", 2);
        let receipt = manager
            .reserve(&mut catalog, Some(&alice), PATIENT, None, now())
            .unwrap();

        let err = manager
            .cancel(&mut catalog, Some(&bob), &receipt.reservation_id, now())
            .unwrap_err();
        assert_eq!(err, ClientError::Unauthorized);
        assert!(manager.get(&receipt.reservation_id).unwrap().is_active());
    }

    #[test]
    fn test_cancel_unknown_reservation() {
        let (mut catalog, mut manager) = setup();
        let alice = user("alice@example.com", 1);
        let err = manager
            .cancel(&mut catalog, Some(&alice), "nope", now())
            .unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND");
    }

    #[test]
    fn test_cancel_for_book_only_touches_active() {
        let (mut catalog, mut manager) = setup();
        let alice = user("alice@example.com", 1);
        let bob = user("bob@example.com", 2);
        let first = manager
            .reserve(&mut catalog, Some(&alice), PATIENT, None, now())
            .unwrap();
        manager
            .cancel(&mut catalog, Some(&alice), &first.reservation_id, now())
            .unwrap();
        manager.reserve(&mut catalog, Some(&bob), PATIENT, None, now()).unwrap();
        manager.reserve(&mut catalog, Some(&bob), WIND, None, now()).unwrap();

        let later = now() + Duration::days(1);
        assert_eq!(manager.cancel_for_book(PATIENT, later), 1);
        assert!(manager
            .all()
            .iter()
            .filter(|r| r.book_id == PATIENT)
            .all(|r| !r.is_active() && r.cancelled_date.is_some()));
        assert_eq!(manager.get(&first.reservation_id).unwrap().cancelled_date, Some(now()));
        assert!(manager.all().iter().any(|r| r.book_id == WIND && r.is_active()));
    }

    #[test]
    fn test_list_for_user_newest_first() {
        let (mut catalog, mut manager) = setup();
        let alice = user("alice@example.com", 1);
        let bob = user("bob@example.com", 2);
        manager.reserve(&mut catalog, Some(&alice), PATIENT, None, now()).unwrap();
        manager
            .reserve(&mut catalog, Some(&alice), WIND, None, now() + Duration::hours(1))
            .unwrap();
        manager.reserve(&mut catalog, Some(&bob), PATIENT, None, now()).unwrap();

        let mine = manager.list_for_user(alice.id);
        let books: Vec<&str> = mine.iter().map(|r| r.book_id.as_str()).collect();
        assert_eq!(books, vec![WIND, PATIENT]);
    }

    #[tokio::test]
    async fn test_concurrent_reservations_on_last_copy() {
        // Two users race for the single remaining copy through a shared catalog
        let shared = Arc::new(Mutex::new(setup()));
        let mut handles = Vec::new();
        for (email, id) in [("alice@example.com", 1), ("bob@example.com", 2)] {
            let shared = shared.clone();
            handles.push(tokio::spawn(async move {
                let contender = user(email, id);
                let mut guard = shared.lock().await;
                let (catalog, manager) = &mut *guard;
                tokio::task::yield_now().await;
                manager.reserve(catalog, Some(&contender), WIND, None, now())
            }));
        }

        let mut successes = 0;
        let mut sold_out = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => successes += 1,
                Err(ClientError::NoCopiesAvailable(_)) => sold_out += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }

        assert_eq!((successes, sold_out), (1, 1));
        let guard = shared.lock().await;
        let book = guard.0.get_by_id(WIND).unwrap();
        assert_eq!(book.available_copies, 0);
        assert!(book.available_copies <= book.total_copies);
        assert_eq!(guard.1.all().len(), 1);
    }
}
