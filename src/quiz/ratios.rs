use rand::Rng;

use super::{
    Topic,
    options::{Answer, Distractors, Draft},
    pick,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scenario {
    Recipe,
    Classroom,
    Travel,
}

const SCENARIOS: [Scenario; 3] = [Scenario::Recipe, Scenario::Classroom, Scenario::Travel];

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Reduce `a:b` to lowest terms.
pub fn simplify_ratio(a: u32, b: u32) -> (u32, u32) {
    match gcd(a, b) {
        0 => (a, b),
        common => (a / common, b / common),
    }
}

pub(super) fn generate<R: Rng>(rng: &mut R) -> Draft {
    let (prompt, first, second) = match pick(rng, &SCENARIOS) {
        Scenario::Recipe => {
            let flour = rng.random_range(2..=12);
            let sugar = rng.random_range(2..=12);
            (
                format!(
                    "A recipe calls for {flour} cups of flour and {sugar} cups of sugar. \
                     What is the ratio of flour to sugar?"
                ),
                flour,
                sugar,
            )
        }
        Scenario::Classroom => {
            let boys = rng.random_range(2..=11);
            let students = rng.random_range(boys + 1..=12);
            (
                format!(
                    "In a class of {students} students, {boys} are boys. \
                     What is the ratio of boys to total students?"
                ),
                boys,
                students,
            )
        }
        Scenario::Travel => {
            let miles = rng.random_range(2..=12);
            let hours = rng.random_range(2..=12);
            (
                format!(
                    "A car travels {miles} miles in {hours} hours. \
                     What is the ratio of miles to hours?"
                ),
                miles,
                hours,
            )
        }
    };

    let (a, b) = simplify_ratio(first, second);
    Draft::new(
        Topic::RatiosAndProportions,
        prompt,
        Answer::Ratio(a, b),
        Distractors::Ratios { low: 1, high: 15 },
    )
}
