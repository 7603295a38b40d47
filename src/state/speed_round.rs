use std::time::{Duration, Instant};

use thiserror::Error;

/// Lifecycle of a timed speed round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedRoundPhase {
    /// No round has been started yet.
    Idle,
    /// Answers are accepted until `deadline`.
    Active {
        /// Instant after which answers are rejected.
        deadline: Instant,
    },
    /// Time ran out; the tally is final.
    Finished,
}

/// Points and counters accumulated during one round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundTally {
    /// Points earned in the round.
    pub score: u64,
    /// Questions answered in the round.
    pub answered: u64,
    /// Questions answered correctly in the round.
    pub correct: u64,
}

/// Reasons an operation is rejected by the round state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpeedRoundError {
    /// `start` was called while a round is still running.
    #[error("speed round already running")]
    AlreadyActive,
    /// No round is running.
    #[error("no speed round is running")]
    NotActive,
    /// The deadline has passed; call `tick` to finish the round.
    #[error("speed round time is up")]
    Expired,
}

/// Timed round state machine, advanced only by explicit calls carrying the current instant.
#[derive(Debug, Clone)]
pub struct SpeedRound {
    phase: SpeedRoundPhase,
    duration: Duration,
    points_per_correct: u64,
    tally: RoundTally,
}

impl SpeedRound {
    /// Idle round that will last `duration` once started.
    pub fn new(duration: Duration, points_per_correct: u64) -> Self {
        Self {
            phase: SpeedRoundPhase::Idle,
            duration,
            points_per_correct,
            tally: RoundTally::default(),
        }
    }

    /// Current phase, without advancing time.
    pub fn phase(&self) -> SpeedRoundPhase {
        self.phase
    }

    /// Tally so far.
    pub fn tally(&self) -> RoundTally {
        self.tally
    }

    /// Time left before the deadline, zero unless active.
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.phase {
            SpeedRoundPhase::Active { deadline } => deadline.saturating_duration_since(now),
            _ => Duration::ZERO,
        }
    }

    /// Begin a fresh round. Allowed from `Idle` and `Finished`.
    pub fn start(&mut self, now: Instant) -> Result<Instant, SpeedRoundError> {
        if matches!(self.phase, SpeedRoundPhase::Active { .. }) {
            return Err(SpeedRoundError::AlreadyActive);
        }

        let deadline = now + self.duration;
        self.phase = SpeedRoundPhase::Active { deadline };
        self.tally = RoundTally::default();
        Ok(deadline)
    }

    /// Move an expired round to `Finished`.
    ///
    /// Returns the final tally exactly once, on the call that observes the expiry.
    pub fn tick(&mut self, now: Instant) -> Option<RoundTally> {
        match self.phase {
            SpeedRoundPhase::Active { deadline } if now >= deadline => {
                self.phase = SpeedRoundPhase::Finished;
                Some(self.tally)
            }
            _ => None,
        }
    }

    /// Count one answer submitted at `now`.
    pub fn record_answer(&mut self, now: Instant, correct: bool) -> Result<RoundTally, SpeedRoundError> {
        match self.phase {
            SpeedRoundPhase::Active { deadline } if now < deadline => {
                self.tally.answered += 1;
                if correct {
                    self.tally.correct += 1;
                    self.tally.score += self.points_per_correct;
                }
                Ok(self.tally)
            }
            SpeedRoundPhase::Active { .. } => Err(SpeedRoundError::Expired),
            SpeedRoundPhase::Idle | SpeedRoundPhase::Finished => Err(SpeedRoundError::NotActive),
        }
    }
}
