//! Answer rendering and the distractor policy shared by every topic.

use rand::{Rng, seq::SliceRandom};

use super::{GenerationError, Question, Topic};

/// Number of choices presented for every question.
pub const OPTION_COUNT: usize = 4;
/// Upper bound on distractor samples before generation gives up.
pub const MAX_DISTRACTOR_ATTEMPTS: usize = 1_000;

/// Correct answer computed by a topic generator, before rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Answer {
    /// Real value rendered with at most `places` decimals.
    Decimal { value: f64, places: usize },
    /// Whole number.
    Integer(i64),
    /// Ratio already reduced to lowest terms.
    Ratio(u32, u32),
}

impl Answer {
    fn numeric(&self) -> f64 {
        match *self {
            Answer::Decimal { value, .. } => value,
            Answer::Integer(value) => value as f64,
            Answer::Ratio(a, b) => f64::from(a) / f64::from(b.max(1)),
        }
    }

    fn render(&self) -> String {
        match *self {
            Answer::Decimal { value, places } => format_decimal(value, places),
            Answer::Integer(value) => value.to_string(),
            Answer::Ratio(a, b) => format!("{a}:{b}"),
        }
    }

    /// Render a perturbed value in the same shape as this answer.
    fn render_like(&self, value: f64) -> String {
        match *self {
            Answer::Decimal { places, .. } => format_decimal(value, places),
            _ => format_decimal(value, 0),
        }
    }
}

/// How wrong options are sampled around the correct answer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Distractors {
    /// Uniform offset in `[-magnitude, magnitude]`, rounded to `places` decimals.
    Offset { magnitude: f64, places: usize },
    /// Whole-number offset in `-magnitude..=magnitude`.
    WholeOffset { magnitude: i64 },
    /// Independent integers drawn from `low..=high`.
    Range { low: i64, high: i64 },
    /// Ratios `a:b` with both parts drawn from `low..=high`, never equivalent to the answer.
    Ratios { low: u32, high: u32 },
}

/// Output of a topic generator: everything but the final option layout.
#[derive(Debug, Clone)]
pub struct Draft {
    pub topic: Topic,
    pub prompt: String,
    pub answer: Answer,
    pub distractors: Distractors,
    pub unit: Option<&'static str>,
}

impl Draft {
    pub fn new(topic: Topic, prompt: String, answer: Answer, distractors: Distractors) -> Self {
        Self {
            topic,
            prompt,
            answer,
            distractors,
            unit: None,
        }
    }

    pub fn with_unit(mut self, unit: &'static str) -> Self {
        self.unit = Some(unit);
        self
    }

    /// Display text of the correct answer, unit included.
    pub fn rendered_answer(&self) -> String {
        self.decorate(self.answer.render())
    }

    fn decorate(&self, text: String) -> String {
        match self.unit {
            Some(unit) => format!("{text} {unit}"),
            None => text,
        }
    }

    /// Draw one candidate distractor; `None` when the sample is not a valid option.
    fn sample<R: Rng>(&self, rng: &mut R) -> Option<String> {
        let text = match self.distractors {
            Distractors::Offset { magnitude, places } => {
                let scale = 10f64.powi(places as i32);
                let raw = self.answer.numeric() + rng.random_range(-magnitude..=magnitude);
                let value = (raw * scale).round() / scale;
                if value <= 0.0 {
                    return None;
                }
                format_decimal(value, places)
            }
            Distractors::WholeOffset { magnitude } => {
                let value = self.answer.numeric() + rng.random_range(-magnitude..=magnitude) as f64;
                if value <= 0.0 {
                    return None;
                }
                self.answer.render_like(value)
            }
            Distractors::Range { low, high } => {
                let value = rng.random_range(low..=high);
                if value <= 0 {
                    return None;
                }
                value.to_string()
            }
            Distractors::Ratios { low, high } => {
                let a = rng.random_range(low..=high);
                let b = rng.random_range(low..=high);
                if let Answer::Ratio(x, y) = self.answer {
                    if u64::from(a) * u64::from(y) == u64::from(b) * u64::from(x) {
                        return None;
                    }
                }
                format!("{a}:{b}")
            }
        };

        Some(self.decorate(text))
    }
}

/// Fill a draft with distractors and place the correct answer at a uniformly random slot.
pub fn assemble<R: Rng>(rng: &mut R, draft: Draft) -> Result<Question, GenerationError> {
    let correct = draft.rendered_answer();
    let mut distractors: Vec<String> = Vec::with_capacity(OPTION_COUNT - 1);
    let mut attempts = 0;

    while distractors.len() < OPTION_COUNT - 1 {
        if attempts == MAX_DISTRACTOR_ATTEMPTS {
            return Err(GenerationError::DistractorsExhausted {
                topic: draft.topic,
                attempts,
            });
        }
        attempts += 1;

        let Some(candidate) = draft.sample(rng) else {
            continue;
        };
        if candidate != correct && !distractors.contains(&candidate) {
            distractors.push(candidate);
        }
    }

    distractors.shuffle(rng);
    let correct_index = rng.random_range(0..OPTION_COUNT);
    let mut options = distractors;
    options.insert(correct_index, correct);

    Ok(Question {
        topic: draft.topic,
        prompt: draft.prompt,
        options,
        correct_index,
    })
}

/// Format with `places` decimals, then strip trailing zeros and a dangling point.
pub fn format_decimal(value: f64, places: usize) -> String {
    let text = format!("{value:.places$}");
    let trimmed = if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text.as_str()
    };

    if trimmed == "-0" {
        "0".into()
    } else {
        trimmed.to_string()
    }
}
