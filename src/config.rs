//! Application-level configuration loading: store location, timers and scoring rules.

use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "MATH_CHALLENGE_CONFIG_PATH";
/// Default shared player registry, relative to the working directory.
const DEFAULT_STORE_PATH: &str = "shared_players.json";

/// Points awarded by the different game modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scoring {
    /// Points for a correct answer outside speed rounds.
    pub base_points: u64,
    /// Bonus for an instant answer; one point is lost per whole second taken.
    pub max_speed_bonus: u64,
    /// Points per correct answer during a speed round.
    pub speed_round_points: u64,
}

impl Scoring {
    /// Speed bonus for an answer that took `elapsed`.
    pub fn speed_bonus(&self, elapsed: Duration) -> u64 {
        self.max_speed_bonus.saturating_sub(elapsed.as_secs())
    }
}

impl Default for Scoring {
    fn default() -> Self {
        Self {
            base_points: 10,
            max_speed_bonus: 5,
            speed_round_points: 5,
        }
    }
}

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    /// Shared player registry document.
    pub store_path: PathBuf,
    /// Length of a speed round.
    pub speed_round: Duration,
    /// How long leaderboard and analytics reads may be served from memory.
    pub leaderboard_cache_ttl: Duration,
    /// Point values.
    pub scoring: Scoring,
}

impl AppConfig {
    /// Load the configuration from the resolved path, falling back to built-in defaults.
    pub fn load() -> Self {
        Self::load_from(&resolve_config_path())
    }

    /// Load the configuration from `path`, falling back to built-in defaults.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let app_config: Self = raw.into();
                    info!(
                        path = %path.display(),
                        store = %app_config.store_path.display(),
                        "loaded configuration"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        RawConfig::default().into()
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    store_path: PathBuf,
    speed_round_secs: u64,
    leaderboard_cache_ms: u64,
    scoring: RawScoring,
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            speed_round_secs: 60,
            leaderboard_cache_ms: 2_000,
            scoring: RawScoring::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawScoring {
    base_points: u64,
    max_speed_bonus: u64,
    speed_round_points: u64,
}

impl Default for RawScoring {
    fn default() -> Self {
        let scoring = Scoring::default();
        Self {
            base_points: scoring.base_points,
            max_speed_bonus: scoring.max_speed_bonus,
            speed_round_points: scoring.speed_round_points,
        }
    }
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        Self {
            store_path: value.store_path,
            speed_round: Duration::from_secs(value.speed_round_secs),
            leaderboard_cache_ttl: Duration::from_millis(value.leaderboard_cache_ms),
            scoring: Scoring {
                base_points: value.scoring.base_points,
                max_speed_bonus: value.scoring.max_speed_bonus,
                speed_round_points: value.scoring.speed_round_points,
            },
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
