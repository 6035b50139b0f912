//! Demo cafe menu endpoints

use axum::{http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::menu::{demo_menu, MenuItem};

#[derive(Serialize, ToSchema)]
pub struct MenuAck {
    pub message: String,
    pub item: MenuItem,
}

/// Fixed demo menu
#[utoipa::path(
    get,
    path = "/api/menu",
    tag = "menu",
    responses(
        (status = 200, description = "Menu", body = Vec<MenuItem>)
    )
)]
pub async fn get_menu() -> Json<Vec<MenuItem>> {
    Json(demo_menu())
}

/// Acknowledge a menu item; nothing is stored
#[utoipa::path(
    post,
    path = "/api/menu",
    tag = "menu",
    request_body = MenuItem,
    responses(
        (status = 201, description = "Item acknowledged", body = MenuAck)
    )
)]
pub async fn add_menu_item(Json(item): Json<MenuItem>) -> (StatusCode, Json<MenuAck>) {
    (
        StatusCode::CREATED,
        Json(MenuAck {
            message: "Menu item received (demo only, not saved)".to_string(),
            item,
        }),
    )
}
