use std::time::Instant;

use tracing::{info, warn};

use crate::{
    dto::{
        player::PlayerSummary,
        speed_round::{SpeedAnswerOutcome, SpeedRoundStatus},
    },
    error::ServiceError,
    services::ensure_player,
    state::{
        SharedState, SpeedRoundSession,
        speed_round::{SpeedRound, SpeedRoundError},
    },
};

/// Start a speed round for `name` and hand out its first question.
pub fn start(state: &SharedState, name: &str) -> Result<SpeedRoundStatus, ServiceError> {
    ensure_player(state, name)?;
    let now = state.now();

    let mut session = state
        .speed_rounds()
        .entry(name.to_string())
        .or_insert_with(|| idle_session(state));
    let merged = settle(state, name, &mut session, now)?;

    let deadline = session.round.start(now)?;
    session.question = Some(state.generate_question(None)?);
    info!(
        player = %name,
        secs = deadline.saturating_duration_since(now).as_secs(),
        "speed round started"
    );

    Ok(SpeedRoundStatus::from_session(&session, now).with_merged(merged))
}

/// Current round state; finishes and merges the round once the deadline has passed.
pub fn status(state: &SharedState, name: &str) -> Result<SpeedRoundStatus, ServiceError> {
    ensure_player(state, name)?;
    let now = state.now();

    let Some(mut session) = state.speed_rounds().get_mut(name) else {
        return Ok(SpeedRoundStatus::from_session(&idle_session(state), now));
    };
    let merged = settle(state, name, &mut session, now)?;
    Ok(SpeedRoundStatus::from_session(&session, now).with_merged(merged))
}

/// Score the current speed-round question and move on to the next one.
pub fn answer(
    state: &SharedState,
    name: &str,
    selected_index: usize,
) -> Result<SpeedAnswerOutcome, ServiceError> {
    let now = state.now();
    let Some(mut session) = state.speed_rounds().get_mut(name) else {
        return Err(SpeedRoundError::NotActive.into());
    };

    if settle(state, name, &mut session, now)?.is_some() {
        return Err(SpeedRoundError::Expired.into());
    }
    let Some(question) = session.question.take() else {
        return Err(SpeedRoundError::NotActive.into());
    };
    if selected_index >= question.options.len() {
        let option_count = question.options.len();
        session.question = Some(question);
        return Err(ServiceError::InvalidInput(format!(
            "option index {selected_index} out of range (0..{option_count})"
        )));
    }

    let correct = question.is_correct(selected_index);
    let tally = session.round.record_answer(now, correct)?;
    session.question = Some(state.generate_question(None)?);
    info!(
        player = %name,
        correct,
        round_score = tally.score,
        answered = tally.answered,
        "speed round answer"
    );

    Ok(SpeedAnswerOutcome {
        correct,
        correct_option: question.correct_option().to_string(),
        status: SpeedRoundStatus::from_session(&session, now),
    })
}

fn idle_session(state: &SharedState) -> SpeedRoundSession {
    let config = state.config();
    SpeedRoundSession {
        round: SpeedRound::new(config.speed_round, config.scoring.speed_round_points),
        question: None,
    }
}

/// Finish an expired round and fold its tally into the stored totals.
///
/// The round reports its tally only once, so the merge happens at most once per round.
fn settle(
    state: &SharedState,
    name: &str,
    session: &mut SpeedRoundSession,
    now: Instant,
) -> Result<Option<PlayerSummary>, ServiceError> {
    let Some(tally) = session.round.tick(now) else {
        return Ok(None);
    };
    session.question = None;

    let merged = state
        .players()
        .update(name, &mut |player| {
            player.merge_round(tally.score, tally.answered, tally.correct)
        })
        .inspect_err(|err| {
            warn!(player = %name, error = %err, score = tally.score, "failed to merge speed round");
        })?;

    match merged {
        Some(player) => {
            info!(
                player = %name,
                score = tally.score,
                answered = tally.answered,
                correct = tally.correct,
                "speed round merged"
            );
            Ok(Some(PlayerSummary::new(name, &player)))
        }
        None => {
            warn!(player = %name, "speed round finished for a player no longer registered");
            Ok(None)
        }
    }
}
