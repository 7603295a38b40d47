use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::leaderboard::{AnalyticsResponse, LeaderboardResponse},
    services::leaderboard_service,
    state::SharedState,
};

/// Read-only ranking and analytics views, polled by clients.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/leaderboard", get(leaderboard))
        .route("/analytics", get(analytics))
}

#[utoipa::path(
    get,
    path = "/leaderboard",
    tag = "leaderboard",
    responses((status = 200, description = "Players ranked by score", body = LeaderboardResponse))
)]
/// Return the ranking and whether tournament mode is open.
pub async fn leaderboard(State(state): State<SharedState>) -> Json<LeaderboardResponse> {
    Json(leaderboard_service::leaderboard(&state))
}

#[utoipa::path(
    get,
    path = "/analytics",
    tag = "leaderboard",
    responses((status = 200, description = "Aggregate performance metrics", body = AnalyticsResponse))
)]
/// Return aggregate performance metrics.
pub async fn analytics(State(state): State<SharedState>) -> Json<AnalyticsResponse> {
    Json(leaderboard_service::analytics(&state))
}
