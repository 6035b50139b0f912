//! Data models for Bookcafe

pub mod book;
pub mod menu;
pub mod order;
pub mod reservation;
pub mod user;

// Re-export commonly used types
pub use book::{Book, BookPatch, NewBook};
pub use menu::MenuItem;
pub use order::{CreateOrder, Order};
pub use reservation::{CreateReservation, Reservation, ReservationStatus};
pub use user::{User, UserInfo, UserType};
