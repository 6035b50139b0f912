//! Dashboard statistics endpoint

use axum::{extract::State, Json};

use crate::{services::stats::DashboardStats, AppState};

/// Order, sales, book and user counts
#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    tag = "stats",
    responses(
        (status = 200, description = "Dashboard figures", body = DashboardStats)
    )
)]
pub async fn get_dashboard_stats(State(state): State<AppState>) -> Json<DashboardStats> {
    Json(state.services.stats.dashboard().await)
}
