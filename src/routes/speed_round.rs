use axum::{
    Json, Router,
    extract::{Path, State},
    routing::post,
};

use crate::{
    dto::speed_round::{SpeedAnswerOutcome, SpeedAnswerRequest, SpeedRoundStatus},
    error::AppError,
    services::speed_round_service,
    state::SharedState,
};

/// Timed speed-round endpoints.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route(
            "/players/{name}/speed-round",
            post(start_round).get(round_status),
        )
        .route("/players/{name}/speed-round/answers", post(answer))
}

#[utoipa::path(
    post,
    path = "/players/{name}/speed-round",
    tag = "speed-round",
    params(("name" = String, Path, description = "Player name (case-sensitive)")),
    responses(
        (status = 200, description = "Round started with its first question", body = SpeedRoundStatus),
        (status = 404, description = "Unknown player"),
        (status = 409, description = "A round is already running")
    )
)]
/// Start a speed round.
pub async fn start_round(
    State(state): State<SharedState>,
    Path(name): Path<String>,
) -> Result<Json<SpeedRoundStatus>, AppError> {
    Ok(Json(speed_round_service::start(&state, &name)?))
}

#[utoipa::path(
    get,
    path = "/players/{name}/speed-round",
    tag = "speed-round",
    params(("name" = String, Path, description = "Player name (case-sensitive)")),
    responses(
        (status = 200, description = "Round status; finishes the round once time is up", body = SpeedRoundStatus),
        (status = 404, description = "Unknown player")
    )
)]
/// Poll the speed round.
pub async fn round_status(
    State(state): State<SharedState>,
    Path(name): Path<String>,
) -> Result<Json<SpeedRoundStatus>, AppError> {
    Ok(Json(speed_round_service::status(&state, &name)?))
}

#[utoipa::path(
    post,
    path = "/players/{name}/speed-round/answers",
    tag = "speed-round",
    params(("name" = String, Path, description = "Player name (case-sensitive)")),
    request_body = SpeedAnswerRequest,
    responses(
        (status = 200, description = "Answer counted; next question attached", body = SpeedAnswerOutcome),
        (status = 400, description = "Option index out of range"),
        (status = 409, description = "No round running or time is up")
    )
)]
/// Answer the current speed-round question.
pub async fn answer(
    State(state): State<SharedState>,
    Path(name): Path<String>,
    Json(payload): Json<SpeedAnswerRequest>,
) -> Result<Json<SpeedAnswerOutcome>, AppError> {
    let outcome = speed_round_service::answer(&state, &name, payload.selected_index)?;
    Ok(Json(outcome))
}
