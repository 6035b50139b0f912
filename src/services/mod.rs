//! Business logic services

pub mod auth;
pub mod catalog;
pub mod orders;
pub mod reservations;
pub mod stats;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub catalog: catalog::CatalogService,
    pub orders: orders::OrdersService,
    pub reservations: reservations::ReservationsService,
    pub stats: stats::StatsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            auth: auth::AuthService::new(repository.clone()),
            catalog: catalog::CatalogService::new(repository.clone()),
            orders: orders::OrdersService::new(repository.clone()),
            reservations: reservations::ReservationsService::new(repository.clone()),
            stats: stats::StatsService::new(repository),
        }
    }
}
