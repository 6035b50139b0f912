//! Book catalog endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, NewBook},
    AppState,
};

/// Bulk catalog overwrite request
#[derive(Deserialize, ToSchema)]
pub struct SyncBooksRequest {
    /// Full client-side catalog
    #[schema(value_type = Vec<Book>)]
    pub books: Option<Value>,
}

/// Generic acknowledgement
#[derive(Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// List all books
#[utoipa::path(
    get,
    path = "/api/books",
    tag = "books",
    responses(
        (status = 200, description = "All books", body = Vec<Book>)
    )
)]
pub async fn list_books(State(state): State<AppState>) -> Json<Vec<Book>> {
    Json(state.services.catalog.list_books().await)
}

/// Add a book
#[utoipa::path(
    post,
    path = "/api/books",
    tag = "books",
    request_body = NewBook,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Missing title or author", body = crate::error::ErrorResponse),
        (status = 500, description = "Store failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    Json(input): Json<NewBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let created = state.services.catalog.create_book(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Overwrite the stored catalog with a client's full copy
#[utoipa::path(
    post,
    path = "/api/books/sync",
    tag = "books",
    request_body = SyncBooksRequest,
    responses(
        (status = 200, description = "Catalog replaced", body = MessageResponse),
        (status = 400, description = "books is not an array", body = crate::error::ErrorResponse),
        (status = 500, description = "Store failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn sync_books(
    State(state): State<AppState>,
    Json(request): Json<SyncBooksRequest>,
) -> AppResult<Json<MessageResponse>> {
    let books: Vec<Book> = parse_array(request.books, "books")?;
    let count = state.services.catalog.sync_books(books).await?;

    Ok(Json(MessageResponse {
        message: format!("Synced {} books", count),
    }))
}

/// Decode a JSON array field, rejecting anything that is not an array
pub(crate) fn parse_array<T: serde::de::DeserializeOwned>(
    value: Option<Value>,
    field: &str,
) -> AppResult<Vec<T>> {
    match value {
        Some(value @ Value::Array(_)) => serde_json::from_value(value)
            .map_err(|e| AppError::BadRequest(format!("Invalid {}: {}", field, e))),
        _ => Err(AppError::BadRequest(format!("{} must be an array", field))),
    }
}
