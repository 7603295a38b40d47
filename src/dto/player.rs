use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{dao::models::PlayerEntity, dto::validation::validate_player_name};

/// Payload used to join the game under a (case-sensitive) name.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct JoinRequest {
    #[validate(
        length(min = 1, max = 40),
        custom(function = validate_player_name)
    )]
    pub name: String,
}

/// Player statistics as displayed in lists and after each answer.
#[derive(Debug, Serialize, ToSchema, Clone, PartialEq)]
pub struct PlayerSummary {
    pub name: String,
    pub score: u64,
    pub questions_answered: u64,
    pub correct_answers: u64,
    /// Percentage of correct answers (0 when nothing was answered yet).
    pub accuracy: f64,
    pub join_time: String,
}

impl PlayerSummary {
    pub fn new(name: impl Into<String>, player: &PlayerEntity) -> Self {
        Self {
            name: name.into(),
            score: player.score,
            questions_answered: player.questions_answered,
            correct_answers: player.correct_answers,
            accuracy: player.accuracy(),
            join_time: player.join_time.clone(),
        }
    }
}

/// Result of a join attempt.
#[derive(Debug, Serialize, ToSchema)]
pub struct JoinResponse {
    /// True when the player was registered by this call.
    pub created: bool,
    pub message: String,
    pub player: PlayerSummary,
}
