//! Demo authentication endpoint

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::user::{UserInfo, UserType},
    AppState,
};

/// Login request
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    /// "customer" (default) or "admin"; only used when the user is created
    pub user_type: Option<String>,
}

/// Login response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    /// Opaque session token
    pub token: String,
    pub user: UserInfo,
}

/// Log in (no password verification; unknown emails are registered)
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Missing email or password", body = crate::error::ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let user_type = request
        .user_type
        .as_deref()
        .and_then(|t| t.parse::<UserType>().ok());

    let (token, user) = state
        .services
        .auth
        .login(
            request.email.as_deref().unwrap_or_default(),
            request.password.as_deref().unwrap_or_default(),
            user_type,
        )
        .await?;

    Ok(Json(LoginResponse {
        token,
        user: UserInfo::from(&user),
    }))
}
