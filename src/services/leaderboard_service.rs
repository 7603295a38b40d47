use tracing::info;

use crate::{
    dao::models::PlayerMap,
    dto::{
        leaderboard::{ActionResponse, AnalyticsResponse, LeaderboardEntry, LeaderboardResponse},
        player::PlayerSummary,
    },
    error::ServiceError,
    state::SharedState,
};

/// Players needed before the tournament mode opens.
const TOURNAMENT_MIN_PLAYERS: usize = 2;

/// Players ranked by score.
pub fn leaderboard(state: &SharedState) -> LeaderboardResponse {
    let players = state.players().load_all();
    let entries = ranked(&players)
        .into_iter()
        .enumerate()
        .map(|(position, player)| LeaderboardEntry {
            rank: position + 1,
            name: player.name,
            score: player.score,
            accuracy: player.accuracy,
        })
        .collect();

    LeaderboardResponse {
        tournament_ready: players.len() >= TOURNAMENT_MIN_PLAYERS,
        entries,
    }
}

/// Aggregate metrics across every registered player.
pub fn analytics(state: &SharedState) -> AnalyticsResponse {
    let players = state.players().load_all();
    let player_count = players.len();
    let divisor = player_count.max(1) as f64;

    let total_score: u64 = players.values().map(|player| player.score).sum();
    let total_questions = players.values().map(|player| player.questions_answered).sum();
    let total_accuracy: f64 = players.values().map(|player| player.accuracy()).sum();
    let ranked = ranked(&players);

    AnalyticsResponse {
        player_count,
        average_score: total_score as f64 / divisor,
        total_questions,
        average_accuracy: total_accuracy / divisor,
        top_scorer: ranked.first().map(|player| player.name.clone()),
        players: ranked,
    }
}

/// Wipe the registry and forget every pending question and speed round.
pub fn reset(state: &SharedState) -> Result<ActionResponse, ServiceError> {
    state.players().reset_all()?;
    state.clear_sessions();
    info!("player registry reset");

    Ok(ActionResponse {
        message: "all players have been reset".into(),
    })
}

/// Highest score first; ties keep join order.
fn ranked(players: &PlayerMap) -> Vec<PlayerSummary> {
    let mut summaries: Vec<_> = players
        .iter()
        .map(|(name, player)| PlayerSummary::new(name.as_str(), player))
        .collect();
    summaries.sort_by(|a, b| b.score.cmp(&a.score));
    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dao::models::PlayerEntity,
        services::test_support::harness,
        state::PendingQuestion,
    };

    fn seed(state: &SharedState, players: &[(&str, u64, u64, u64)]) {
        let map: PlayerMap = players
            .iter()
            .map(|&(name, score, answered, correct)| {
                (
                    name.to_string(),
                    PlayerEntity {
                        score,
                        questions_answered: answered,
                        correct_answers: correct,
                        join_time: "2026-01-01T00:00:00Z".into(),
                    },
                )
            })
            .collect();
        state.players().save_all(&map).unwrap();
    }

    #[test]
    fn ranks_by_score_with_stable_ties() {
        let h = harness();
        seed(
            &h.state,
            &[("Ada", 20, 2, 2), ("Bob", 42, 4, 3), ("Cy", 20, 5, 2)],
        );

        let board = leaderboard(&h.state);
        assert!(board.tournament_ready);
        let order: Vec<_> = board
            .entries
            .iter()
            .map(|entry| (entry.rank, entry.name.as_str()))
            .collect();
        assert_eq!(order, [(1, "Bob"), (2, "Ada"), (3, "Cy")]);
        assert_eq!(board.entries[0].accuracy, 75.0);
    }

    #[test]
    fn tournament_needs_two_players() {
        let h = harness();
        seed(&h.state, &[("Ada", 0, 0, 0)]);
        assert!(!leaderboard(&h.state).tournament_ready);
    }

    #[test]
    fn analytics_aggregates_every_player() {
        let h = harness();
        seed(&h.state, &[("Ada", 30, 4, 2), ("Bob", 10, 2, 2)]);

        let report = analytics(&h.state);
        assert_eq!(report.player_count, 2);
        assert_eq!(report.average_score, 20.0);
        assert_eq!(report.total_questions, 6);
        assert_eq!(report.average_accuracy, 75.0);
        assert_eq!(report.top_scorer.as_deref(), Some("Ada"));
    }

    #[test]
    fn analytics_of_empty_registry() {
        let h = harness();
        let report = analytics(&h.state);
        assert_eq!(report.player_count, 0);
        assert_eq!(report.average_score, 0.0);
        assert!(report.top_scorer.is_none());
    }

    #[test]
    fn reset_clears_players_and_sessions() {
        let h = harness();
        seed(&h.state, &[("Ada", 30, 4, 2)]);
        let question = h.state.generate_question(None).unwrap();
        h.state.pending().insert(
            "Ada".into(),
            PendingQuestion {
                question,
                issued_at: h.state.now(),
            },
        );

        reset(&h.state).unwrap();
        assert!(h.state.players().load_all().is_empty());
        assert!(h.state.pending().is_empty());
    }
}
