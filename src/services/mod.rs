/// OpenAPI documentation generation.
pub mod documentation;
/// Question issuing and scoring for the quick challenge and topic focus modes.
pub mod game_service;
/// Health check service.
pub mod health_service;
/// Ranking, aggregate analytics and registry reset.
pub mod leaderboard_service;
/// Player registration and lookups.
pub mod player_service;
/// Timed speed rounds.
pub mod speed_round_service;

use crate::{error::ServiceError, state::SharedState};

/// Fail with `NotFound` unless `name` is registered.
fn ensure_player(state: &SharedState, name: &str) -> Result<(), ServiceError> {
    if state.players().get(name).is_none() {
        return Err(ServiceError::NotFound(format!("player `{name}` not found")));
    }
    Ok(())
}
