use rand::Rng;

use super::{
    Topic,
    options::{Answer, Distractors, Draft},
    pick,
};

const SHARED_DENOMINATORS: [u32; 8] = [2, 3, 4, 5, 6, 8, 10, 12];
const SMALL_DENOMINATORS: [u32; 4] = [2, 3, 4, 5];
const DISPLAY_PLACES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    const ALL: [Operation; 4] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
    ];

    fn symbol(self) -> &'static str {
        match self {
            Operation::Add => "+",
            Operation::Subtract => "-",
            Operation::Multiply => "×",
            Operation::Divide => "÷",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fraction {
    numerator: u32,
    denominator: u32,
}

impl Fraction {
    fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }
}

fn evaluate(operation: Operation, lhs: Fraction, rhs: Fraction) -> f64 {
    let (a, b) = (f64::from(lhs.numerator), f64::from(lhs.denominator));
    let (c, d) = (f64::from(rhs.numerator), f64::from(rhs.denominator));
    match operation {
        Operation::Add => (a * d + c * b) / (b * d),
        Operation::Subtract => (a * d - c * b) / (b * d),
        Operation::Multiply => (a * c) / (b * d),
        Operation::Divide => (a * d) / (b * c),
    }
}

pub(super) fn generate<R: Rng>(rng: &mut R) -> Draft {
    let operation = pick(rng, &Operation::ALL);

    let (lhs, rhs) = match operation {
        Operation::Add | Operation::Subtract => {
            let denominator = pick(rng, &SHARED_DENOMINATORS);
            let mut first = rng.random_range(1..denominator);
            let mut second = rng.random_range(1..denominator);
            if operation == Operation::Subtract && first < second {
                std::mem::swap(&mut first, &mut second);
            }
            (
                Fraction::new(first, denominator),
                Fraction::new(second, denominator),
            )
        }
        Operation::Multiply | Operation::Divide => (
            Fraction::new(rng.random_range(1..=5), pick(rng, &SMALL_DENOMINATORS)),
            Fraction::new(rng.random_range(1..=5), pick(rng, &SMALL_DENOMINATORS)),
        ),
    };

    let prompt = format!(
        "What is {}/{} {} {}/{}?",
        lhs.numerator,
        lhs.denominator,
        operation.symbol(),
        rhs.numerator,
        rhs.denominator
    );

    Draft::new(
        Topic::Fractions,
        prompt,
        Answer::Decimal {
            value: evaluate(operation, lhs, rhs),
            places: DISPLAY_PLACES,
        },
        Distractors::Offset {
            magnitude: 0.5,
            places: DISPLAY_PLACES,
        },
    )
}
