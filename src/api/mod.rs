//! API handlers for Bookcafe REST endpoints

pub mod auth;
pub mod books;
pub mod health;
pub mod menu;
pub mod openapi;
pub mod orders;
pub mod reservations;
pub mod stats;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{AppError, AppState};

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/health", get(health::health_check))
        // Authentication
        .route("/api/auth/login", post(auth::login))
        // Books
        .route("/api/books", get(books::list_books).post(books::create_book))
        .route("/api/books/sync", post(books::sync_books))
        // Orders
        .route("/api/orders", get(orders::list_orders).post(orders::create_order))
        // Reservations
        .route(
            "/api/reservations",
            get(reservations::list_reservations).post(reservations::create_reservation),
        )
        .route("/api/reservations/sync", post(reservations::sync_reservations))
        // Dashboard
        .route("/api/dashboard/stats", get(stats::get_dashboard_stats))
        // Menu
        .route("/api/menu", get(menu::get_menu).post(menu::add_menu_item))
        .fallback(not_found)
        .with_state(state);

    Router::new()
        .merge(openapi::create_openapi_router())
        .merge(api)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Fallback for unmatched routes
pub async fn not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}
