use serde::Serialize;
use utoipa::ToSchema;

use crate::dto::player::PlayerSummary;

/// One ranked line of the leaderboard.
#[derive(Debug, Serialize, ToSchema, Clone, PartialEq)]
pub struct LeaderboardEntry {
    /// 1-based position.
    pub rank: usize,
    pub name: String,
    pub score: u64,
    pub accuracy: f64,
}

/// Players ranked by score, highest first; ties keep join order.
#[derive(Debug, Serialize, ToSchema)]
pub struct LeaderboardResponse {
    /// Tournament mode needs at least two players.
    pub tournament_ready: bool,
    pub entries: Vec<LeaderboardEntry>,
}

/// Aggregate performance metrics over every player.
#[derive(Debug, Serialize, ToSchema)]
pub struct AnalyticsResponse {
    pub player_count: usize,
    pub average_score: f64,
    pub total_questions: u64,
    pub average_accuracy: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_scorer: Option<String>,
    pub players: Vec<PlayerSummary>,
}

/// Generic action acknowledgement.
#[derive(Debug, Serialize, ToSchema)]
pub struct ActionResponse {
    pub message: String,
}
