//! Reservation model and related types

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{book::Book, user::User};

/// Number of days a reservation is held
pub const RESERVATION_DAYS: i64 = 7;

/// Reservation status. `Cancelled` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    #[default]
    Active,
    Cancelled,
}

/// A claim on one copy of a book, with user and book snapshots taken at
/// reservation time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: String,
    pub book_id: String,
    pub user_id: i64,
    pub user_email: String,
    pub user_name: String,
    pub book_title: String,
    pub book_author: String,
    pub reservation_date: DateTime<Utc>,
    pub expiry_date: DateTime<Utc>,
    #[serde(default)]
    pub status: ReservationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancelled_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Reservation {
    /// Open a new active reservation for `user` on `book`
    pub fn open(book: &Book, user: &User, notes: Option<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: reservation_id(now),
            book_id: book.id.clone(),
            user_id: user.id,
            user_email: user.email.clone(),
            user_name: user.name.clone(),
            book_title: book.title.clone(),
            book_author: book.author.clone(),
            reservation_date: now,
            expiry_date: expiry_for(now),
            status: ReservationStatus::Active,
            cancelled_date: None,
            notes: notes.filter(|n| !n.trim().is_empty()),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == ReservationStatus::Active
    }

    /// Flip to cancelled and stamp the date
    pub fn cancel(&mut self, now: DateTime<Utc>) {
        self.status = ReservationStatus::Cancelled;
        self.cancelled_date = Some(now);
    }

    /// Whether the hold period has elapsed. Expiry never changes status.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.is_active() && self.expiry_date <= now
    }
}

/// Expiry date for a reservation made at `reserved_at`
pub fn expiry_for(reserved_at: DateTime<Utc>) -> DateTime<Utc> {
    reserved_at + Duration::days(RESERVATION_DAYS)
}

/// Time-based identifier with a random suffix so that reservations made in
/// the same millisecond stay distinct
pub fn reservation_id(now: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}-{}", now.timestamp_millis(), &suffix[..8])
}

/// Reservation as posted to the server mirror; absent fields are filled in
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservation {
    pub id: Option<String>,
    #[serde(default)]
    pub book_id: String,
    #[serde(default)]
    pub user_id: i64,
    #[serde(default)]
    pub user_email: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub book_title: String,
    #[serde(default)]
    pub book_author: String,
    pub reservation_date: Option<DateTime<Utc>>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub status: Option<ReservationStatus>,
    pub cancelled_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

impl CreateReservation {
    pub fn into_reservation(self, now: DateTime<Utc>) -> Reservation {
        let reservation_date = self.reservation_date.unwrap_or(now);
        Reservation {
            id: self.id.unwrap_or_else(|| reservation_id(now)),
            book_id: self.book_id,
            user_id: self.user_id,
            user_email: self.user_email,
            user_name: self.user_name,
            book_title: self.book_title,
            book_author: self.book_author,
            reservation_date,
            expiry_date: self.expiry_date.unwrap_or_else(|| expiry_for(reservation_date)),
            status: self.status.unwrap_or_default(),
            cancelled_date: self.cancelled_date,
            notes: self.notes,
        }
    }
}
