use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the math challenge backend.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::players::list_topics,
        crate::routes::players::list_players,
        crate::routes::players::join,
        crate::routes::players::get_player,
        crate::routes::players::next_question,
        crate::routes::players::submit_answer,
        crate::routes::speed_round::start_round,
        crate::routes::speed_round::round_status,
        crate::routes::speed_round::answer,
        crate::routes::leaderboard::leaderboard,
        crate::routes::leaderboard::analytics,
        crate::routes::admin::reset,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::health::HealthStatus,
            crate::dto::player::JoinRequest,
            crate::dto::player::JoinResponse,
            crate::dto::player::PlayerSummary,
            crate::dto::question::TopicItem,
            crate::dto::question::QuestionView,
            crate::dto::question::AnswerRequest,
            crate::dto::question::AnswerOutcome,
            crate::dto::phase::VisibleRoundPhase,
            crate::dto::speed_round::SpeedRoundStatus,
            crate::dto::speed_round::SpeedAnswerRequest,
            crate::dto::speed_round::SpeedAnswerOutcome,
            crate::dto::leaderboard::LeaderboardEntry,
            crate::dto::leaderboard::LeaderboardResponse,
            crate::dto::leaderboard::AnalyticsResponse,
            crate::dto::leaderboard::ActionResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "players", description = "Player registration and statistics"),
        (name = "quiz", description = "Quick challenge and topic focus questions"),
        (name = "speed-round", description = "Timed speed rounds"),
        (name = "leaderboard", description = "Ranking, tournament readiness and analytics"),
        (name = "admin", description = "Maintenance operations"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/healthcheck",
            "/topics",
            "/players",
            "/players/{name}",
            "/players/{name}/questions",
            "/players/{name}/answers",
            "/players/{name}/speed-round",
            "/players/{name}/speed-round/answers",
            "/leaderboard",
            "/analytics",
            "/admin/reset",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
