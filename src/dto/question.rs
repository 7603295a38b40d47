use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{dto::player::PlayerSummary, quiz::{Question, Topic}};

/// Optional topic filter; omitted means a random topic.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct QuestionQuery {
    /// Topic label (`Ratios & Proportions`) or slug (`ratios_and_proportions`).
    pub topic: Option<String>,
}

/// Question as shown to the player; the correct index stays on the server.
#[derive(Debug, Serialize, ToSchema, Clone, PartialEq)]
pub struct QuestionView {
    pub topic: String,
    pub prompt: String,
    pub options: Vec<String>,
}

impl From<&Question> for QuestionView {
    fn from(question: &Question) -> Self {
        Self {
            topic: question.topic.label().to_string(),
            prompt: question.prompt.clone(),
            options: question.options.clone(),
        }
    }
}

/// Option picked by the player.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AnswerRequest {
    pub selected_index: usize,
}

/// Scoring result for a single answer.
#[derive(Debug, Serialize, ToSchema)]
pub struct AnswerOutcome {
    pub correct: bool,
    /// Points added to the score, bonus included.
    pub points: u64,
    pub speed_bonus: u64,
    pub correct_index: usize,
    pub correct_option: String,
    pub elapsed_secs: f64,
    pub player: PlayerSummary,
}

/// Topic entry for pickers.
#[derive(Debug, Serialize, ToSchema)]
pub struct TopicItem {
    pub label: String,
    pub slug: String,
}

impl From<Topic> for TopicItem {
    fn from(topic: Topic) -> Self {
        Self {
            label: topic.label().to_string(),
            slug: topic.slug().to_string(),
        }
    }
}
