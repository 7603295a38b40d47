use axum::{Json, Router, extract::State, routing::post};

use crate::{
    dto::leaderboard::ActionResponse, error::AppError, services::leaderboard_service,
    state::SharedState,
};

/// Maintenance endpoints.
pub fn router() -> Router<SharedState> {
    Router::new().route("/admin/reset", post(reset))
}

#[utoipa::path(
    post,
    path = "/admin/reset",
    tag = "admin",
    responses(
        (status = 200, description = "All players removed", body = ActionResponse),
        (status = 503, description = "Player registry unavailable")
    )
)]
/// Remove every player and drop in-memory sessions.
pub async fn reset(State(state): State<SharedState>) -> Result<Json<ActionResponse>, AppError> {
    Ok(Json(leaderboard_service::reset(&state)?))
}
