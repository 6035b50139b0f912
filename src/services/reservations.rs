//! Reservation mirror service
//!
//! The server only stores what clients send; reservation rules are enforced
//! by the client-side reservation manager.

use chrono::Utc;

use crate::{
    error::AppResult,
    models::reservation::{CreateReservation, Reservation},
    repository::Repository,
};

#[derive(Clone)]
pub struct ReservationsService {
    repository: Repository,
}

impl ReservationsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list_reservations(&self) -> Vec<Reservation> {
        self.repository.reservations.list().await
    }

    pub async fn create_reservation(&self, input: CreateReservation) -> AppResult<Reservation> {
        let reservation = input.into_reservation(Utc::now());
        self.repository.reservations.insert(reservation).await
    }

    /// Replace the mirrored reservations with the client's full copy
    pub async fn sync_reservations(&self, reservations: Vec<Reservation>) -> AppResult<usize> {
        self.repository.reservations.replace_all(&reservations).await?;
        tracing::info!("Synced {} reservations", reservations.len());
        Ok(reservations.len())
    }
}
