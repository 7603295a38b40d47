pub mod health;
pub mod leaderboard;
pub mod phase;
pub mod player;
pub mod question;
pub mod speed_round;
pub mod validation;

use std::time::Duration;

/// Seconds with millisecond precision, as shown to clients.
fn seconds(duration: Duration) -> f64 {
    (duration.as_millis() as f64) / 1_000.0
}
