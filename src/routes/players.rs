use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use validator::Validate;

use crate::{
    dto::{
        player::{JoinRequest, JoinResponse, PlayerSummary},
        question::{AnswerOutcome, AnswerRequest, QuestionQuery, QuestionView, TopicItem},
    },
    error::AppError,
    services::{game_service, player_service},
    state::SharedState,
};

/// Player registration and the question/answer loop.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/topics", get(list_topics))
        .route("/players", get(list_players).post(join))
        .route("/players/{name}", get(get_player))
        .route("/players/{name}/questions", post(next_question))
        .route("/players/{name}/answers", post(submit_answer))
}

#[utoipa::path(
    get,
    path = "/topics",
    tag = "quiz",
    responses((status = 200, description = "Available topics", body = [TopicItem]))
)]
/// List the topics available to the topic focus mode.
pub async fn list_topics() -> Json<Vec<TopicItem>> {
    Json(game_service::list_topics())
}

#[utoipa::path(
    get,
    path = "/players",
    tag = "players",
    responses((status = 200, description = "Registered players in join order", body = [PlayerSummary]))
)]
/// List every registered player.
pub async fn list_players(State(state): State<SharedState>) -> Json<Vec<PlayerSummary>> {
    Json(player_service::list_players(&state))
}

#[utoipa::path(
    post,
    path = "/players",
    tag = "players",
    request_body = JoinRequest,
    responses(
        (status = 200, description = "Player joined or welcomed back", body = JoinResponse),
        (status = 400, description = "Invalid player name"),
        (status = 503, description = "Player registry unavailable")
    )
)]
/// Join the game, creating the player on first visit.
pub async fn join(
    State(state): State<SharedState>,
    Json(payload): Json<JoinRequest>,
) -> Result<Json<JoinResponse>, AppError> {
    payload.validate()?;
    Ok(Json(player_service::join(&state, payload)?))
}

#[utoipa::path(
    get,
    path = "/players/{name}",
    tag = "players",
    params(("name" = String, Path, description = "Player name (case-sensitive)")),
    responses(
        (status = 200, description = "Player statistics", body = PlayerSummary),
        (status = 404, description = "Unknown player")
    )
)]
/// Return a single player's statistics.
pub async fn get_player(
    State(state): State<SharedState>,
    Path(name): Path<String>,
) -> Result<Json<PlayerSummary>, AppError> {
    Ok(Json(player_service::get_player(&state, &name)?))
}

#[utoipa::path(
    post,
    path = "/players/{name}/questions",
    tag = "quiz",
    params(
        ("name" = String, Path, description = "Player name (case-sensitive)"),
        QuestionQuery
    ),
    responses(
        (status = 200, description = "New question; replaces any unanswered one", body = QuestionView),
        (status = 400, description = "Unknown topic"),
        (status = 404, description = "Unknown player")
    )
)]
/// Issue a question, from the given topic or a random one.
pub async fn next_question(
    State(state): State<SharedState>,
    Path(name): Path<String>,
    Query(query): Query<QuestionQuery>,
) -> Result<Json<QuestionView>, AppError> {
    let question = game_service::next_question(&state, &name, query.topic.as_deref())?;
    Ok(Json(question))
}

#[utoipa::path(
    post,
    path = "/players/{name}/answers",
    tag = "quiz",
    params(("name" = String, Path, description = "Player name (case-sensitive)")),
    request_body = AnswerRequest,
    responses(
        (status = 200, description = "Answer scored", body = AnswerOutcome),
        (status = 400, description = "Option index out of range"),
        (status = 409, description = "No pending question")
    )
)]
/// Answer the pending question.
pub async fn submit_answer(
    State(state): State<SharedState>,
    Path(name): Path<String>,
    Json(payload): Json<AnswerRequest>,
) -> Result<Json<AnswerOutcome>, AppError> {
    let outcome = game_service::submit_answer(&state, &name, payload.selected_index)?;
    Ok(Json(outcome))
}
