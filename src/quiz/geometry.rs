use rand::Rng;

use super::{
    Topic,
    options::{Answer, Distractors, Draft},
};

/// Shape and measurement asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Figure {
    RectangleArea { length: u32, width: u32 },
    TriangleArea { base: u32, height: u32 },
    RectanglePerimeter { length: u32, width: u32 },
    PrismVolume { length: u32, width: u32, height: u32 },
}

impl Figure {
    fn random<R: Rng>(rng: &mut R) -> Self {
        match rng.random_range(0..4) {
            0 => Figure::RectangleArea {
                length: rng.random_range(5..=15),
                width: rng.random_range(3..=12),
            },
            1 => Figure::TriangleArea {
                base: rng.random_range(6..=16),
                height: rng.random_range(4..=12),
            },
            2 => Figure::RectanglePerimeter {
                length: rng.random_range(5..=15),
                width: rng.random_range(3..=12),
            },
            _ => Figure::PrismVolume {
                length: rng.random_range(3..=8),
                width: rng.random_range(3..=8),
                height: rng.random_range(3..=8),
            },
        }
    }

    fn answer(self) -> Answer {
        match self {
            Figure::RectangleArea { length, width } => Answer::Integer(i64::from(length * width)),
            Figure::TriangleArea { base, height } => Answer::Decimal {
                value: 0.5 * f64::from(base) * f64::from(height),
                places: 1,
            },
            Figure::RectanglePerimeter { length, width } => {
                Answer::Integer(i64::from(2 * (length + width)))
            }
            Figure::PrismVolume {
                length,
                width,
                height,
            } => Answer::Integer(i64::from(length * width * height)),
        }
    }

    fn unit(self) -> &'static str {
        match self {
            Figure::RectangleArea { .. } | Figure::TriangleArea { .. } => "square units",
            Figure::RectanglePerimeter { .. } => "units",
            Figure::PrismVolume { .. } => "cubic units",
        }
    }

    fn prompt(self) -> String {
        match self {
            Figure::RectangleArea { length, width } => format!(
                "What is the area of a rectangle with length {length} units and width {width} units?"
            ),
            Figure::TriangleArea { base, height } => format!(
                "What is the area of a triangle with base {base} units and height {height} units?"
            ),
            Figure::RectanglePerimeter { length, width } => format!(
                "What is the perimeter of a rectangle with length {length} units and width {width} units?"
            ),
            Figure::PrismVolume {
                length,
                width,
                height,
            } => format!(
                "What is the volume of a rectangular prism with length {length}, width {width}, and height {height} units?"
            ),
        }
    }
}

pub(super) fn generate<R: Rng>(rng: &mut R) -> Draft {
    let figure = Figure::random(rng);
    Draft::new(
        Topic::Geometry,
        figure.prompt(),
        figure.answer(),
        Distractors::WholeOffset { magnitude: 20 },
    )
    .with_unit(figure.unit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formulas() {
        assert_eq!(
            Figure::RectangleArea {
                length: 7,
                width: 4
            }
            .answer(),
            Answer::Integer(28)
        );
        assert_eq!(
            Figure::TriangleArea {
                base: 7,
                height: 5
            }
            .answer(),
            Answer::Decimal {
                value: 17.5,
                places: 1
            }
        );
        assert_eq!(
            Figure::RectanglePerimeter {
                length: 7,
                width: 4
            }
            .answer(),
            Answer::Integer(22)
        );
        assert_eq!(
            Figure::PrismVolume {
                length: 3,
                width: 4,
                height: 5
            }
            .answer(),
            Answer::Integer(60)
        );
    }

    #[test]
    fn units_follow_the_measurement() {
        assert_eq!(
            Figure::TriangleArea { base: 6, height: 4 }.unit(),
            "square units"
        );
        assert_eq!(
            Figure::RectanglePerimeter {
                length: 5,
                width: 3
            }
            .unit(),
            "units"
        );
        assert_eq!(
            Figure::PrismVolume {
                length: 3,
                width: 3,
                height: 3
            }
            .unit(),
            "cubic units"
        );
    }
}
