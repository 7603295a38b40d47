use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Shared player registry keyed by case-sensitive player name, kept in join order.
pub type PlayerMap = IndexMap<String, PlayerEntity>;

/// Statistics persisted for a single player.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerEntity {
    /// Accumulated points across every game mode.
    pub score: u64,
    /// Number of questions answered.
    pub questions_answered: u64,
    /// Number of questions answered correctly.
    pub correct_answers: u64,
    /// Timestamp of first registration.
    pub join_time: String,
}

impl PlayerEntity {
    /// Fresh record for a player joining now.
    pub fn new(join_time: impl Into<String>) -> Self {
        Self {
            score: 0,
            questions_answered: 0,
            correct_answers: 0,
            join_time: join_time.into(),
        }
    }

    /// Counters must never report more correct answers than answered questions.
    pub fn is_consistent(&self) -> bool {
        self.correct_answers <= self.questions_answered
    }

    /// Percentage of correct answers; a player with no answers has 0 %.
    pub fn accuracy(&self) -> f64 {
        self.correct_answers as f64 / self.questions_answered.max(1) as f64 * 100.0
    }

    /// Record one answered question.
    pub fn record_answer(&mut self, correct: bool, points: u64) {
        self.questions_answered += 1;
        if correct {
            self.correct_answers += 1;
            self.score += points;
        }
    }

    /// Fold a finished speed round into the totals.
    pub fn merge_round(&mut self, score: u64, answered: u64, correct: u64) {
        self.score += score;
        self.questions_answered += answered;
        self.correct_answers += correct.min(answered);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accuracy_handles_zero_answers() {
        let player = PlayerEntity::new("2026-01-01T00:00:00Z");
        assert_eq!(player.accuracy(), 0.0);
    }

    #[test]
    fn record_answer_updates_counters() {
        let mut player = PlayerEntity::new("t");
        player.record_answer(true, 14);
        player.record_answer(false, 14);
        assert_eq!(player.score, 14);
        assert_eq!(player.questions_answered, 2);
        assert_eq!(player.correct_answers, 1);
        assert_eq!(player.accuracy(), 50.0);
        assert!(player.is_consistent());
    }

    #[test]
    fn merge_round_keeps_counters_consistent() {
        let mut player = PlayerEntity::new("t");
        player.merge_round(25, 7, 5);
        assert_eq!(player.score, 25);
        assert_eq!(player.questions_answered, 7);
        assert_eq!(player.correct_answers, 5);
        assert!(player.is_consistent());
    }

    #[test]
    fn serializes_with_snake_case_fields() {
        let player = PlayerEntity {
            score: 10,
            questions_answered: 2,
            correct_answers: 1,
            join_time: "12:00:00".into(),
        };
        let json = serde_json::to_value(&player).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "score": 10,
                "questions_answered": 2,
                "correct_answers": 1,
                "join_time": "12:00:00"
            })
        );
    }
}
