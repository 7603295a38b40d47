use tracing::{debug, info};

use crate::{
    dto::{
        player::PlayerSummary,
        question::{AnswerOutcome, QuestionView, TopicItem},
    },
    error::ServiceError,
    quiz::{GenerationError, Topic},
    services::ensure_player,
    state::{PendingQuestion, SharedState},
};

/// Topics offered by the topic focus mode.
pub fn list_topics() -> Vec<TopicItem> {
    Topic::ALL.into_iter().map(TopicItem::from).collect()
}

/// Issue a question to `name`, replacing any unanswered one.
///
/// Without a topic this is the quick challenge mode (random topic); with one it is topic focus.
pub fn next_question(
    state: &SharedState,
    name: &str,
    topic: Option<&str>,
) -> Result<QuestionView, ServiceError> {
    let topic = topic
        .map(str::trim)
        .filter(|topic| !topic.is_empty())
        .map(str::parse::<Topic>)
        .transpose()
        .map_err(GenerationError::from)?;
    ensure_player(state, name)?;

    let question = state.generate_question(topic)?;
    let view = QuestionView::from(&question);
    debug!(player = %name, topic = %question.topic, "issued question");

    state.pending().insert(
        name.to_string(),
        PendingQuestion {
            question,
            issued_at: state.now(),
        },
    );
    Ok(view)
}

/// Score the pending question of `name` and persist the result.
///
/// A correct answer earns the base points plus a speed bonus that shrinks by one point per
/// whole second since the question was issued.
pub fn submit_answer(
    state: &SharedState,
    name: &str,
    selected_index: usize,
) -> Result<AnswerOutcome, ServiceError> {
    {
        let Some(pending) = state.pending().get(name) else {
            return Err(no_pending_question(name));
        };
        let option_count = pending.question.options.len();
        if selected_index >= option_count {
            return Err(ServiceError::InvalidInput(format!(
                "option index {selected_index} out of range (0..{option_count})"
            )));
        }
    }
    let Some((_, pending)) = state.pending().remove(name) else {
        return Err(no_pending_question(name));
    };

    let elapsed = state.now().saturating_duration_since(pending.issued_at);
    let scoring = state.config().scoring;
    let correct = pending.question.is_correct(selected_index);
    let speed_bonus = if correct {
        scoring.speed_bonus(elapsed)
    } else {
        0
    };
    let points = if correct {
        scoring.base_points + speed_bonus
    } else {
        0
    };

    let player = state
        .players()
        .update(name, &mut |player| player.record_answer(correct, points))?
        .ok_or_else(|| ServiceError::NotFound(format!("player `{name}` not found")))?;

    info!(
        player = %name,
        topic = %pending.question.topic,
        correct,
        points,
        elapsed_ms = elapsed.as_millis() as u64,
        "answer scored"
    );

    Ok(AnswerOutcome {
        correct,
        points,
        speed_bonus,
        correct_index: pending.question.correct_index,
        correct_option: pending.question.correct_option().to_string(),
        elapsed_secs: elapsed.as_secs_f64(),
        player: PlayerSummary::new(name, &player),
    })
}

fn no_pending_question(name: &str) -> ServiceError {
    ServiceError::InvalidState(format!("player `{name}` has no pending question"))
}
