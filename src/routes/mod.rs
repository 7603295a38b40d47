use axum::Router;

use crate::state::SharedState;

pub mod admin;
pub mod docs;
pub mod health;
pub mod leaderboard;
pub mod players;
pub mod speed_round;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    health::router()
        .merge(players::router())
        .merge(speed_round::router())
        .merge(leaderboard::router())
        .merge(admin::router())
        .merge(docs::router())
        .with_state(state)
}
