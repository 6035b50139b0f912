//! Bookcafe
//!
//! Demo bookstore and cafe: a REST JSON server persisting users, books,
//! orders and reservations as flat JSON files, and a client-side domain layer
//! that owns the live catalog and reservation workflow and mirrors it back to
//! the server with best-effort bulk syncs.

use std::{sync::Arc, time::Instant};

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: AppConfig, services: services::Services) -> Self {
        Self {
            config: Arc::new(config),
            services: Arc::new(services),
            started_at: Instant::now(),
        }
    }
}
