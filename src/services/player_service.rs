use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tracing::{info, warn};

use crate::{
    dao::models::PlayerEntity,
    dto::player::{JoinRequest, JoinResponse, PlayerSummary},
    error::ServiceError,
    state::SharedState,
};

/// Register `request.name`, or greet an existing player without touching their stats.
pub fn join(state: &SharedState, request: JoinRequest) -> Result<JoinResponse, ServiceError> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(ServiceError::InvalidInput(
            "player name must not be blank".into(),
        ));
    }

    let (player, created) = state
        .players()
        .register(name, PlayerEntity::new(join_timestamp()))?;

    let message = if created {
        info!(player = %name, "player joined");
        format!("Welcome, {name}!")
    } else {
        info!(player = %name, score = player.score, "player returned");
        format!("Welcome back, {name}!")
    };

    Ok(JoinResponse {
        created,
        message,
        player: PlayerSummary::new(name, &player),
    })
}

/// Stats of a single player.
pub fn get_player(state: &SharedState, name: &str) -> Result<PlayerSummary, ServiceError> {
    state
        .players()
        .get(name)
        .map(|player| PlayerSummary::new(name, &player))
        .ok_or_else(|| ServiceError::NotFound(format!("player `{name}` not found")))
}

/// Every registered player in join order.
pub fn list_players(state: &SharedState) -> Vec<PlayerSummary> {
    state
        .players()
        .load_all()
        .iter()
        .map(|(name, player)| PlayerSummary::new(name.as_str(), player))
        .collect()
}

fn join_timestamp() -> String {
    let now = OffsetDateTime::now_utc();
    now.format(&Rfc3339).unwrap_or_else(|err| {
        warn!(error = %err, "failed to format join time; storing unix seconds");
        now.unix_timestamp().to_string()
    })
}
