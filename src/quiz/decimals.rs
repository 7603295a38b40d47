use std::fmt;

use rand::Rng;

use super::{
    Topic,
    options::{Answer, Distractors, Draft, format_decimal},
    pick,
};

/// Decimal number stored as an integer count of `10^-places` units, so operands and
/// results stay exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fixed {
    units: i64,
    places: u32,
}

impl Fixed {
    fn new(units: i64, places: u32) -> Self {
        Self { units, places }
    }

    fn value(self) -> f64 {
        self.units as f64 / 10i64.pow(self.places) as f64
    }

    fn add(self, other: Fixed) -> Fixed {
        debug_assert_eq!(self.places, other.places);
        Fixed::new(self.units + other.units, self.places)
    }

    fn sub(self, other: Fixed) -> Fixed {
        debug_assert_eq!(self.places, other.places);
        Fixed::new(self.units - other.units, self.places)
    }

    fn mul(self, other: Fixed) -> Fixed {
        Fixed::new(self.units * other.units, self.places + other.places)
    }
}

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_decimal(self.value(), self.places as usize))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

const OPERATIONS: [Operation; 4] = [
    Operation::Add,
    Operation::Subtract,
    Operation::Multiply,
    Operation::Divide,
];

const ANSWER_PLACES: usize = 2;

pub(super) fn generate<R: Rng>(rng: &mut R) -> Draft {
    let (prompt, result) = match pick(rng, &OPERATIONS) {
        Operation::Add => {
            let lhs = Fixed::new(rng.random_range(100..=5_000), 2);
            let rhs = Fixed::new(rng.random_range(100..=2_000), 2);
            (format!("What is {lhs} + {rhs}?"), lhs.add(rhs))
        }
        Operation::Subtract => {
            let mut lhs = Fixed::new(rng.random_range(100..=5_000), 2);
            let mut rhs = Fixed::new(rng.random_range(100..=2_000), 2);
            if lhs.units < rhs.units {
                std::mem::swap(&mut lhs, &mut rhs);
            }
            (format!("What is {lhs} - {rhs}?"), lhs.sub(rhs))
        }
        Operation::Multiply => {
            let lhs = Fixed::new(rng.random_range(10..=100), 1);
            let rhs = Fixed::new(rng.random_range(10..=100), 1);
            (format!("What is {lhs} × {rhs}?"), lhs.mul(rhs))
        }
        Operation::Divide => {
            // Build the dividend from divisor and quotient so the quotient is exact.
            let divisor = Fixed::new(rng.random_range(10..=100), 1);
            let quotient = Fixed::new(rng.random_range(100..=1_000), 2);
            let dividend = divisor.mul(quotient);
            (format!("What is {dividend} ÷ {divisor}?"), quotient)
        }
    };

    Draft::new(
        Topic::Decimals,
        prompt,
        Answer::Decimal {
            value: result.value(),
            places: ANSWER_PLACES,
        },
        Distractors::Offset {
            magnitude: 5.0,
            places: ANSWER_PLACES,
        },
    )
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn fixed_point_arithmetic_is_exact() {
        let a = Fixed::new(1_234, 2);
        let b = Fixed::new(766, 2);
        assert_eq!(a.add(b).to_string(), "20");
        assert_eq!(a.sub(b).to_string(), "4.68");

        let product = Fixed::new(25, 1).mul(Fixed::new(32, 1));
        assert_eq!(product, Fixed::new(800, 2));
        assert_eq!(product.to_string(), "8");
    }

    #[test]
    fn division_quotient_is_exact() {
        let divisor = Fixed::new(37, 1);
        let quotient = Fixed::new(412, 2);
        let dividend = divisor.mul(quotient);
        assert_eq!(dividend.to_string(), "15.244");
        assert!((dividend.value() / divisor.value() - quotient.value()).abs() < 1e-9);
    }

    #[test]
    fn answers_are_positive() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..500 {
            let draft = generate(&mut rng);
            let Answer::Decimal { value, .. } = draft.answer else {
                panic!("decimals produce decimal answers");
            };
            assert!(value >= 0.0, "{}", draft.prompt);
        }
    }
}
