use serde::Serialize;
use utoipa::ToSchema;

use crate::state::speed_round::SpeedRoundPhase;

/// Speed round phase exposed to clients.
#[derive(Debug, Serialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VisibleRoundPhase {
    /// No round started yet.
    Idle,
    /// Round running; answers accepted.
    Active,
    /// Time is up; the tally has been added to the player's totals.
    Finished,
}

impl From<&SpeedRoundPhase> for VisibleRoundPhase {
    fn from(value: &SpeedRoundPhase) -> Self {
        match value {
            SpeedRoundPhase::Idle => VisibleRoundPhase::Idle,
            SpeedRoundPhase::Active { .. } => VisibleRoundPhase::Active,
            SpeedRoundPhase::Finished => VisibleRoundPhase::Finished,
        }
    }
}
