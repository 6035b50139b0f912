//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, books, health, menu, orders, reservations, stats};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookcafe API",
        version = "0.3.0",
        description = "Bookstore and cafe demo REST API. Authentication is a placeholder: tokens are never verified."
    ),
    paths(
        health::health_check,
        auth::login,
        books::list_books,
        books::create_book,
        books::sync_books,
        orders::create_order,
        orders::list_orders,
        reservations::list_reservations,
        reservations::create_reservation,
        reservations::sync_reservations,
        stats::get_dashboard_stats,
        menu::get_menu,
        menu::add_menu_item,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            crate::models::user::UserInfo,
            crate::models::user::UserType,
            // Books
            crate::models::book::Book,
            crate::models::book::NewBook,
            crate::models::book::CopiesInput,
            books::SyncBooksRequest,
            books::MessageResponse,
            // Orders
            crate::models::order::Order,
            crate::models::order::CreateOrder,
            orders::OrderResponse,
            // Reservations
            crate::models::reservation::Reservation,
            crate::models::reservation::ReservationStatus,
            crate::models::reservation::CreateReservation,
            reservations::SyncReservationsRequest,
            // Dashboard
            crate::services::stats::DashboardStats,
            // Menu
            crate::models::menu::MenuItem,
            menu::MenuAck,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check"),
        (name = "auth", description = "Demo login"),
        (name = "books", description = "Book catalog mirror"),
        (name = "orders", description = "Orders"),
        (name = "reservations", description = "Reservation mirror"),
        (name = "stats", description = "Dashboard statistics"),
        (name = "menu", description = "Demo cafe menu")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
