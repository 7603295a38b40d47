pub mod clock;
pub mod speed_round;

use std::{
    sync::{Arc, Mutex, PoisonError},
    time::Instant,
};

use dashmap::DashMap;

use crate::{
    config::AppConfig,
    dao::player_store::{CachedPlayerStore, JsonFilePlayerStore, PlayerStore},
    quiz::{GenerationError, Question, QuestionGenerator, Topic},
};

use self::{
    clock::{Clock, SystemClock},
    speed_round::SpeedRound,
};

pub type SharedState = Arc<AppState>;

/// Question handed to a player and not answered yet.
#[derive(Debug, Clone)]
pub struct PendingQuestion {
    pub question: Question,
    pub issued_at: Instant,
}

/// Speed round owned by one player together with the question currently shown.
#[derive(Debug, Clone)]
pub struct SpeedRoundSession {
    pub round: SpeedRound,
    pub question: Option<Question>,
}

/// Central application state: injected store, clock and generator plus per-player sessions.
pub struct AppState {
    config: AppConfig,
    players: Arc<dyn PlayerStore>,
    clock: Arc<dyn Clock>,
    generator: Mutex<QuestionGenerator>,
    pending: DashMap<String, PendingQuestion>,
    speed_rounds: DashMap<String, SpeedRoundSession>,
}

impl AppState {
    /// Assemble the state from explicit collaborators.
    pub fn new(
        config: AppConfig,
        players: Arc<dyn PlayerStore>,
        clock: Arc<dyn Clock>,
        generator: QuestionGenerator,
    ) -> SharedState {
        Arc::new(Self {
            config,
            players,
            clock,
            generator: Mutex::new(generator),
            pending: DashMap::new(),
            speed_rounds: DashMap::new(),
        })
    }

    /// Production wiring: cached JSON file store, wall clock and an OS-seeded generator.
    pub fn from_config(config: AppConfig) -> SharedState {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let store = CachedPlayerStore::new(
            JsonFilePlayerStore::new(config.store_path.clone()),
            config.leaderboard_cache_ttl,
            clock.clone(),
        );
        Self::new(
            config,
            Arc::new(store),
            clock,
            QuestionGenerator::from_os_rng(),
        )
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Shared player registry.
    pub fn players(&self) -> &dyn PlayerStore {
        self.players.as_ref()
    }

    /// Current instant according to the injected clock.
    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    /// Draw a question from the shared generator.
    pub fn generate_question(&self, topic: Option<Topic>) -> Result<Question, GenerationError> {
        self.generator
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .generate(topic)
    }

    /// Questions awaiting an answer, keyed by player name.
    pub fn pending(&self) -> &DashMap<String, PendingQuestion> {
        &self.pending
    }

    /// Speed rounds keyed by player name.
    pub fn speed_rounds(&self) -> &DashMap<String, SpeedRoundSession> {
        &self.speed_rounds
    }

    /// Drop every in-memory session, e.g. after a registry reset.
    pub fn clear_sessions(&self) {
        self.pending.clear();
        self.speed_rounds.clear();
    }
}
