//! Reservation mirror endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::reservation::{CreateReservation, Reservation},
    AppState,
};

use super::books::{parse_array, MessageResponse};

/// Bulk reservation overwrite request
#[derive(Deserialize, ToSchema)]
pub struct SyncReservationsRequest {
    /// Full client-side reservation set
    #[schema(value_type = Vec<Reservation>)]
    pub reservations: Option<Value>,
}

/// List mirrored reservations
#[utoipa::path(
    get,
    path = "/api/reservations",
    tag = "reservations",
    responses(
        (status = 200, description = "All reservations", body = Vec<Reservation>)
    )
)]
pub async fn list_reservations(State(state): State<AppState>) -> Json<Vec<Reservation>> {
    Json(state.services.reservations.list_reservations().await)
}

/// Store a single reservation
#[utoipa::path(
    post,
    path = "/api/reservations",
    tag = "reservations",
    request_body = CreateReservation,
    responses(
        (status = 201, description = "Reservation stored", body = Reservation),
        (status = 500, description = "Store failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_reservation(
    State(state): State<AppState>,
    Json(input): Json<CreateReservation>,
) -> AppResult<(StatusCode, Json<Reservation>)> {
    let reservation = state.services.reservations.create_reservation(input).await?;
    Ok((StatusCode::CREATED, Json(reservation)))
}

/// Overwrite stored reservations with a client's full copy
#[utoipa::path(
    post,
    path = "/api/reservations/sync",
    tag = "reservations",
    request_body = SyncReservationsRequest,
    responses(
        (status = 200, description = "Reservations replaced", body = MessageResponse),
        (status = 400, description = "reservations is not an array", body = crate::error::ErrorResponse),
        (status = 500, description = "Store failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn sync_reservations(
    State(state): State<AppState>,
    Json(request): Json<SyncReservationsRequest>,
) -> AppResult<Json<MessageResponse>> {
    let reservations: Vec<Reservation> = parse_array(request.reservations, "reservations")?;
    let count = state.services.reservations.sync_reservations(reservations).await?;

    Ok(Json(MessageResponse {
        message: format!("Synced {} reservations", count),
    }))
}
