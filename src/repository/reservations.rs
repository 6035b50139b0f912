//! Reservations repository

use crate::{error::AppResult, models::reservation::Reservation};

use super::{persisted, Collection, JsonStore};

#[derive(Clone)]
pub struct ReservationsRepository {
    store: JsonStore,
}

impl ReservationsRepository {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Vec<Reservation> {
        self.store.read(Collection::Reservations).await
    }

    pub async fn insert(&self, reservation: Reservation) -> AppResult<Reservation> {
        let mut reservations = self.list().await;
        reservations.push(reservation.clone());
        persisted(
            self.store.write(Collection::Reservations, &reservations).await,
            Collection::Reservations,
        )?;
        Ok(reservation)
    }

    /// Overwrite the whole collection
    pub async fn replace_all(&self, reservations: &[Reservation]) -> AppResult<()> {
        persisted(
            self.store.write(Collection::Reservations, reservations).await,
            Collection::Reservations,
        )
    }
}
