//! Randomized multiple-choice question generation for the seven practice topics.
//!
//! Every topic module turns random draws into a [`options::Draft`] (prompt plus the exact
//! answer), and [`options::assemble`] surrounds that answer with distractors. Randomness is
//! injected through [`QuestionGenerator`] so a fixed seed replays the same questions.

mod algebra;
mod decimals;
mod fractions;
mod geometry;
pub mod options;
mod ratios;
mod statistics;
mod word_problems;

use std::{fmt, str::FromStr};

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use self::algebra::{EquationOperation, LinearEquation};
pub use self::ratios::simplify_ratio;
pub use self::statistics::{mean, median, mode, range};

/// Fixed set of math categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topic {
    #[serde(rename = "Fractions")]
    Fractions,
    #[serde(rename = "Decimals")]
    Decimals,
    #[serde(rename = "Ratios & Proportions")]
    RatiosAndProportions,
    #[serde(rename = "Geometry")]
    Geometry,
    #[serde(rename = "Algebra")]
    Algebra,
    #[serde(rename = "Statistics")]
    Statistics,
    #[serde(rename = "Word Problems")]
    WordProblems,
}

impl Topic {
    /// Every topic, in presentation order.
    pub const ALL: [Topic; 7] = [
        Topic::Fractions,
        Topic::Decimals,
        Topic::RatiosAndProportions,
        Topic::Geometry,
        Topic::Algebra,
        Topic::Statistics,
        Topic::WordProblems,
    ];

    /// Human readable label, also used on the wire.
    pub fn label(self) -> &'static str {
        match self {
            Topic::Fractions => "Fractions",
            Topic::Decimals => "Decimals",
            Topic::RatiosAndProportions => "Ratios & Proportions",
            Topic::Geometry => "Geometry",
            Topic::Algebra => "Algebra",
            Topic::Statistics => "Statistics",
            Topic::WordProblems => "Word Problems",
        }
    }

    /// Snake-case identifier, convenient in URLs and query strings.
    pub fn slug(self) -> &'static str {
        match self {
            Topic::Fractions => "fractions",
            Topic::Decimals => "decimals",
            Topic::RatiosAndProportions => "ratios_and_proportions",
            Topic::Geometry => "geometry",
            Topic::Algebra => "algebra",
            Topic::Statistics => "statistics",
            Topic::WordProblems => "word_problems",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raised when a topic name does not match any known topic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown topic `{0}`")]
pub struct TopicError(pub String);

impl FromStr for Topic {
    type Err = TopicError;

    /// Accepts either the label (`Ratios & Proportions`) or the slug (`ratios_and_proportions`),
    /// ignoring ASCII case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Topic::ALL
            .into_iter()
            .find(|topic| {
                topic.label().eq_ignore_ascii_case(wanted) || topic.slug().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| TopicError(s.to_string()))
    }
}

/// Errors surfaced while producing a question.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// Caller asked for a topic outside the fixed set.
    #[error(transparent)]
    UnknownTopic(#[from] TopicError),
    /// The distractor policy could not produce enough distinct options.
    #[error("could not find 4 distinct options for {topic} after {attempts} attempts")]
    DistractorsExhausted {
        /// Topic being generated.
        topic: Topic,
        /// Number of samples drawn before giving up.
        attempts: usize,
    },
}

/// A self-contained multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    /// Topic the question was drawn from.
    pub topic: Topic,
    /// Problem statement with operands interpolated.
    pub prompt: String,
    /// Four distinct displayable choices.
    pub options: Vec<String>,
    /// Position of the correct choice inside `options`.
    pub correct_index: usize,
}

impl Question {
    /// Display text of the correct choice.
    pub fn correct_option(&self) -> &str {
        self.options
            .get(self.correct_index)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Whether `index` selects the correct choice.
    pub fn is_correct(&self, index: usize) -> bool {
        index == self.correct_index
    }
}

/// Question factory over an injectable random source.
#[derive(Debug, Clone)]
pub struct QuestionGenerator<R = StdRng> {
    rng: R,
}

impl QuestionGenerator<StdRng> {
    /// Generator seeded from the operating system.
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    /// Deterministic generator, mainly for tests and replays.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> QuestionGenerator<R> {
    /// Wrap an existing random source.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Produce a question for `topic`, or for a uniformly random topic when `None`.
    pub fn generate(&mut self, topic: Option<Topic>) -> Result<Question, GenerationError> {
        let topic = match topic {
            Some(topic) => topic,
            None => pick(&mut self.rng, &Topic::ALL),
        };

        let draft = draft_for(&mut self.rng, topic);
        options::assemble(&mut self.rng, draft)
    }

    /// Same as [`Self::generate`] but parses the topic name first.
    pub fn generate_named(&mut self, topic: Option<&str>) -> Result<Question, GenerationError> {
        let topic = topic.map(str::parse::<Topic>).transpose()?;
        self.generate(topic)
    }
}

/// Prompt and exact answer for `topic`, before distractors are added.
fn draft_for<R: Rng>(rng: &mut R, topic: Topic) -> options::Draft {
    match topic {
        Topic::Fractions => fractions::generate(rng),
        Topic::Decimals => decimals::generate(rng),
        Topic::RatiosAndProportions => ratios::generate(rng),
        Topic::Geometry => geometry::generate(rng),
        Topic::Algebra => algebra::generate(rng),
        Topic::Statistics => statistics::generate(rng),
        Topic::WordProblems => word_problems::generate(rng),
    }
}

/// Uniform pick from a non-empty slice of copyable items.
fn pick<R: Rng, T: Copy>(rng: &mut R, items: &[T]) -> T {
    items[rng.random_range(0..items.len())]
}
