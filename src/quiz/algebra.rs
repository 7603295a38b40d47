use rand::Rng;

use super::{
    Topic,
    options::{Answer, Distractors, Draft},
    pick,
};

/// Operation applied to `x` in a one-step equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquationOperation {
    /// `x + c = s`
    Add,
    /// `x - c = s`
    Subtract,
    /// `cx = s`
    Multiply,
    /// `x ÷ c = s`
    Divide,
}

impl EquationOperation {
    const ALL: [EquationOperation; 4] = [
        EquationOperation::Add,
        EquationOperation::Subtract,
        EquationOperation::Multiply,
        EquationOperation::Divide,
    ];
}

/// One-step linear equation whose solution is `solution`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearEquation {
    /// Operation linking `x` and the constant.
    pub operation: EquationOperation,
    /// Value of `x`.
    pub solution: i64,
    /// Constant on the left-hand side.
    pub constant: i64,
}

impl LinearEquation {
    /// Build an equation; for division the solution should be a multiple of the constant.
    pub fn new(operation: EquationOperation, solution: i64, constant: i64) -> Self {
        Self {
            operation,
            solution,
            constant,
        }
    }

    /// Right-hand side implied by the solution.
    pub fn rhs(&self) -> i64 {
        match self.operation {
            EquationOperation::Add => self.solution + self.constant,
            EquationOperation::Subtract => self.solution - self.constant,
            EquationOperation::Multiply => self.solution * self.constant,
            EquationOperation::Divide => self.solution / self.constant,
        }
    }

    /// Equation text, e.g. `x + 5 = 12`.
    pub fn equation(&self) -> String {
        let (c, s) = (self.constant, self.rhs());
        match self.operation {
            EquationOperation::Add => format!("x + {c} = {s}"),
            EquationOperation::Subtract => format!("x - {c} = {s}"),
            EquationOperation::Multiply => format!("{c}x = {s}"),
            EquationOperation::Divide => format!("x ÷ {c} = {s}"),
        }
    }

    fn random<R: Rng>(rng: &mut R) -> Self {
        let operation = pick(rng, &EquationOperation::ALL);
        match operation {
            EquationOperation::Add => {
                Self::new(operation, rng.random_range(1..=20), rng.random_range(1..=30))
            }
            EquationOperation::Subtract => {
                let constant = rng.random_range(1..=20);
                let solution = constant + rng.random_range(1..=20);
                Self::new(operation, solution, constant)
            }
            EquationOperation::Multiply => {
                Self::new(operation, rng.random_range(1..=20), rng.random_range(2..=8))
            }
            EquationOperation::Divide => {
                let constant = rng.random_range(2..=8);
                let quotient = rng.random_range(1..=20);
                Self::new(operation, quotient * constant, constant)
            }
        }
    }
}

pub(super) fn generate<R: Rng>(rng: &mut R) -> Draft {
    let equation = LinearEquation::random(rng);
    Draft::new(
        Topic::Algebra,
        format!("Solve for x: {}", equation.equation()),
        Answer::Integer(equation.solution),
        Distractors::Range {
            low: 1,
            high: (equation.solution + 10).max(30),
        },
    )
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn addition_equation_text() {
        let equation = LinearEquation::new(EquationOperation::Add, 7, 5);
        assert_eq!(equation.equation(), "x + 5 = 12");
        assert_eq!(equation.solution, 7);
    }

    #[test]
    fn each_form_is_solved_by_its_solution() {
        assert_eq!(
            LinearEquation::new(EquationOperation::Subtract, 15, 6).equation(),
            "x - 6 = 9"
        );
        assert_eq!(
            LinearEquation::new(EquationOperation::Multiply, 4, 3).equation(),
            "3x = 12"
        );
        assert_eq!(
            LinearEquation::new(EquationOperation::Divide, 24, 8).equation(),
            "x ÷ 8 = 3"
        );
    }

    #[test]
    fn random_equations_are_well_formed() {
        let mut rng = StdRng::seed_from_u64(13);
        for _ in 0..500 {
            let equation = LinearEquation::random(&mut rng);
            assert!(equation.solution > 0);
            assert!(equation.rhs() > 0, "{}", equation.equation());
            if equation.operation == EquationOperation::Divide {
                assert_eq!(equation.solution % equation.constant, 0);
            }
        }
    }
}
