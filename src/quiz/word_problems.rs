use rand::Rng;

use super::{
    Topic,
    options::{Answer, Distractors, Draft},
};

/// Narrative template together with its drawn parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Story {
    Stickers { start: i64, given: i64, bought: i64 },
    Apples { per_day: i64, days: i64 },
    /// Amounts in cents.
    PocketMoney { budget: i64, price: i64 },
}

impl Story {
    fn random<R: Rng>(rng: &mut R) -> Self {
        match rng.random_range(0..3) {
            0 => Story::Stickers {
                start: rng.random_range(20..=50),
                given: rng.random_range(5..=15),
                bought: rng.random_range(8..=20),
            },
            1 => Story::Apples {
                per_day: rng.random_range(25..=75),
                days: rng.random_range(3..=7),
            },
            _ => {
                let budget = rng.random_range(1_000..=5_000);
                let price = rng.random_range(500..=2_500.min(budget - 1));
                Story::PocketMoney { budget, price }
            }
        }
    }

    fn solve(self) -> f64 {
        match self {
            Story::Stickers {
                start,
                given,
                bought,
            } => (start - given + bought) as f64,
            Story::Apples { per_day, days } => (per_day * days) as f64,
            Story::PocketMoney { budget, price } => (budget - price) as f64 / 100.0,
        }
    }

    fn prompt(self) -> String {
        match self {
            Story::Stickers {
                start,
                given,
                bought,
            } => format!(
                "Sarah has {start} stickers. She gives {given} stickers to her friend and buys \
                 {bought} more. How many stickers does she have now?"
            ),
            Story::Apples { per_day, days } => format!(
                "A store sells {per_day} apples per day. How many apples will they sell in {days} days?"
            ),
            Story::PocketMoney { budget, price } => format!(
                "Tom has ${}.{:02}. He buys a toy for ${}.{:02}. How much money does he have left?",
                budget / 100,
                budget % 100,
                price / 100,
                price % 100
            ),
        }
    }
}

pub(super) fn generate<R: Rng>(rng: &mut R) -> Draft {
    let story = Story::random(rng);
    Draft::new(
        Topic::WordProblems,
        story.prompt(),
        Answer::Decimal {
            value: story.solve(),
            places: 2,
        },
        Distractors::Offset {
            magnitude: 10.0,
            places: 2,
        },
    )
}
