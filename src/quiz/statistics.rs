use std::collections::BTreeMap;

use rand::{Rng, seq::index};

use super::{
    Topic,
    options::{Answer, Distractors, Draft},
};

const MIN_VALUE: u32 = 10;
const MAX_VALUE: u32 = 50;

/// Arithmetic mean, `None` for an empty dataset.
pub fn mean(data: &[u32]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    let sum: u64 = data.iter().map(|&v| u64::from(v)).sum();
    Some(sum as f64 / data.len() as f64)
}

/// Middle value, or the average of the two middle values for even lengths.
pub fn median(data: &[u32]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    let mut sorted = data.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((f64::from(sorted[mid - 1]) + f64::from(sorted[mid])) / 2.0)
    } else {
        Some(f64::from(sorted[mid]))
    }
}

/// Most frequent value; ties resolve to the smallest value.
pub fn mode(data: &[u32]) -> Option<u32> {
    let mut counts = BTreeMap::new();
    for &value in data {
        *counts.entry(value).or_insert(0usize) += 1;
    }
    counts
        .into_iter()
        .fold(None, |best: Option<(u32, usize)>, (value, count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((value, count)),
        })
        .map(|(value, _)| value)
}

/// Difference between the largest and smallest values.
pub fn range(data: &[u32]) -> Option<u32> {
    let max = data.iter().max()?;
    let min = data.iter().min()?;
    Some(max - min)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Statistic {
    Mean,
    Median,
    Mode,
    Range,
}

impl Statistic {
    fn name(self) -> &'static str {
        match self {
            Statistic::Mean => "mean",
            Statistic::Median => "median",
            Statistic::Mode => "mode",
            Statistic::Range => "range",
        }
    }
}

/// Distinct base values plus one duplicate, so the mode is unique.
fn dataset_with_mode<R: Rng>(rng: &mut R, len: usize) -> Vec<u32> {
    let span = (MAX_VALUE - MIN_VALUE + 1) as usize;
    let mut data: Vec<u32> = index::sample(rng, span, len)
        .into_iter()
        .map(|offset| MIN_VALUE + offset as u32)
        .collect();
    let repeated = data[rng.random_range(0..data.len())];
    let at = rng.random_range(0..=data.len());
    data.insert(at, repeated);
    data
}

pub(super) fn generate<R: Rng>(rng: &mut R) -> Draft {
    let len = rng.random_range(5..=8);
    let statistic = match rng.random_range(0..4) {
        0 => Statistic::Mean,
        1 => Statistic::Median,
        2 => Statistic::Mode,
        _ => Statistic::Range,
    };

    let data: Vec<u32> = if statistic == Statistic::Mode {
        dataset_with_mode(rng, len)
    } else {
        (0..len)
            .map(|_| rng.random_range(MIN_VALUE..=MAX_VALUE))
            .collect()
    };

    // `data` is never empty, so the fallbacks are unreachable.
    let (answer, distractors) = match statistic {
        Statistic::Mean | Statistic::Median => {
            let value = if statistic == Statistic::Mean {
                mean(&data)
            } else {
                median(&data)
            };
            (
                Answer::Decimal {
                    value: value.unwrap_or_default(),
                    places: 2,
                },
                Distractors::Offset {
                    magnitude: 5.0,
                    places: 1,
                },
            )
        }
        Statistic::Mode | Statistic::Range => {
            let value = if statistic == Statistic::Mode {
                mode(&data)
            } else {
                range(&data)
            };
            (
                Answer::Integer(i64::from(value.unwrap_or_default())),
                Distractors::WholeOffset { magnitude: 10 },
            )
        }
    };

    Draft::new(
        Topic::Statistics,
        format!("What is the {} of this dataset: {data:?}?", statistic.name()),
        answer,
        distractors,
    )
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn reference_dataset() {
        let data = [10, 20, 20, 30, 40];
        assert_eq!(mean(&data), Some(24.0));
        assert_eq!(median(&data), Some(20.0));
        assert_eq!(mode(&data), Some(20));
        assert_eq!(range(&data), Some(30));
    }

    #[test]
    fn even_length_median_averages_middle_pair() {
        assert_eq!(median(&[40, 10, 30, 20]), Some(25.0));
        assert_eq!(median(&[11, 12]), Some(11.5));
    }

    #[test]
    fn empty_dataset_has_no_statistics() {
        assert_eq!(mean(&[]), None);
        assert_eq!(median(&[]), None);
        assert_eq!(mode(&[]), None);
        assert_eq!(range(&[]), None);
    }

    #[test]
    fn mode_ties_pick_smallest() {
        assert_eq!(mode(&[30, 10, 30, 10, 50]), Some(10));
    }

    #[test]
    fn forced_mode_is_unique() {
        let mut rng = StdRng::seed_from_u64(77);
        for _ in 0..300 {
            let len = rng.random_range(5..=8);
            let data = dataset_with_mode(&mut rng, len);
            assert_eq!(data.len(), len + 1);

            let mut sorted = data.clone();
            sorted.sort_unstable();
            let duplicates = sorted.windows(2).filter(|pair| pair[0] == pair[1]).count();
            assert_eq!(duplicates, 1, "{data:?}");
            assert!(data.iter().all(|v| (MIN_VALUE..=MAX_VALUE).contains(v)));
        }
    }
}
