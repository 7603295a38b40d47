use std::time::Instant;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    dto::{phase::VisibleRoundPhase, player::PlayerSummary, question::QuestionView, seconds},
    state::SpeedRoundSession,
};

/// Snapshot of a player's speed round.
#[derive(Debug, Serialize, ToSchema)]
pub struct SpeedRoundStatus {
    pub phase: VisibleRoundPhase,
    pub remaining_secs: f64,
    pub score: u64,
    pub answered: u64,
    pub correct: u64,
    /// Present while the round is active.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<QuestionView>,
    /// Present on the response that closed the round, with the merged totals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merged_into: Option<PlayerSummary>,
}

impl SpeedRoundStatus {
    pub fn from_session(session: &SpeedRoundSession, now: Instant) -> Self {
        let tally = session.round.tally();
        let phase = VisibleRoundPhase::from(&session.round.phase());
        Self {
            phase,
            remaining_secs: seconds(session.round.remaining(now)),
            score: tally.score,
            answered: tally.answered,
            correct: tally.correct,
            question: match phase {
                VisibleRoundPhase::Active => session.question.as_ref().map(QuestionView::from),
                _ => None,
            },
            merged_into: None,
        }
    }

    pub fn with_merged(mut self, player: Option<PlayerSummary>) -> Self {
        self.merged_into = player;
        self
    }
}

/// Option picked during a speed round.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SpeedAnswerRequest {
    pub selected_index: usize,
}

/// Result of a speed-round answer, with the next question when time remains.
#[derive(Debug, Serialize, ToSchema)]
pub struct SpeedAnswerOutcome {
    pub correct: bool,
    pub correct_option: String,
    pub status: SpeedRoundStatus,
}
