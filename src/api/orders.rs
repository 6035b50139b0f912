//! Order endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::order::{CreateOrder, Order},
    AppState,
};

#[derive(Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    pub order: Order,
}

/// Place an order
#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "orders",
    request_body = CreateOrder,
    responses(
        (status = 201, description = "Order created", body = OrderResponse),
        (status = 400, description = "Missing items or total", body = crate::error::ErrorResponse),
        (status = 500, description = "Store failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_order(
    State(state): State<AppState>,
    Json(input): Json<CreateOrder>,
) -> AppResult<(StatusCode, Json<OrderResponse>)> {
    let order = state.services.orders.create_order(input).await?;
    Ok((StatusCode::CREATED, Json(OrderResponse { order })))
}

/// List all orders
#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "orders",
    responses(
        (status = 200, description = "All orders", body = Vec<Order>)
    )
)]
pub async fn list_orders(State(state): State<AppState>) -> Json<Vec<Order>> {
    Json(state.services.orders.list_orders().await)
}
