use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Report whether the player registry can be read.
pub fn health_status(state: &SharedState) -> HealthResponse {
    match state.players().health_check() {
        Ok(()) => HealthResponse::ok(),
        Err(err) => {
            warn!(error = %err, "player registry health check failed");
            HealthResponse::degraded()
        }
    }
}
