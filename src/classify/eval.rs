//! Evaluation utilities: corpus splits, trial statistics, confusion
//! matrices, and a permutation test.
//!
//! The splitting helpers assign items independently (per-item Bernoulli
//! draws), so split sizes vary around their expectation rather than being
//! exact. The permutation test measures how often a random relabeling
//! agrees with the actual labels at least as well as the predictions do;
//! the reported p-value is the add-one estimate `(hits + 1) / (trials +
//! 1)`, which never reaches zero.
//!
//! # Determinism
//!
//! Every randomized helper takes an optional seed and is reproducible
//! when one is given.

use rand::prelude::*;
use rand::rngs::StdRng;

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Error, Result};

fn seeded_rng(seed: Option<u64>) -> Box<dyn RngCore> {
    match seed {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
        None => Box::new(rand::rng()),
    }
}

/// Split `0..n` into (train, test) index lists.
///
/// Each index lands in the training list independently with probability
/// `train_fraction`, so the realized sizes are binomial, not fixed.
pub fn random_split(
    n: usize,
    train_fraction: f64,
    seed: Option<u64>,
) -> Result<(Vec<usize>, Vec<usize>)> {
    if !(0.0..=1.0).contains(&train_fraction) {
        return Err(Error::InvalidParameter {
            name: "train_fraction",
            message: "must be in [0, 1]",
        });
    }
    let mut rng = seeded_rng(seed);
    let mut train = Vec::new();
    let mut test = Vec::new();
    for i in 0..n {
        if rng.random::<f64>() < train_fraction {
            train.push(i);
        } else {
            test.push(i);
        }
    }
    Ok((train, test))
}

/// Keep each of `indices` independently with probability
/// `1 - drop_fraction`, preserving order.
pub fn subsample(indices: &[usize], drop_fraction: f64, seed: Option<u64>) -> Result<Vec<usize>> {
    if !(0.0..=1.0).contains(&drop_fraction) {
        return Err(Error::InvalidParameter {
            name: "drop_fraction",
            message: "must be in [0, 1]",
        });
    }
    let mut rng = seeded_rng(seed);
    Ok(indices
        .iter()
        .copied()
        .filter(|_| rng.random::<f64>() >= drop_fraction)
        .collect())
}

/// Number of positions where the two sequences agree.
pub fn agreement<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    debug_assert_eq!(a.len(), b.len(), "sequences must have equal length");
    a.iter().zip(b).filter(|(x, y)| x == y).count()
}

/// Fraction of predictions matching the actual labels.
pub fn accuracy<T: PartialEq>(predicted: &[T], actual: &[T]) -> Result<f64> {
    if predicted.is_empty() {
        return Err(Error::EmptyInput);
    }
    if predicted.len() != actual.len() {
        return Err(Error::DimensionMismatch {
            expected: predicted.len(),
            found: actual.len(),
        });
    }
    Ok(agreement(predicted, actual) as f64 / predicted.len() as f64)
}

/// Arithmetic mean; zero for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator); zero below two values.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance =
        values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

/// Standard error of the mean; zero for an empty slice.
pub fn standard_error(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    std_dev(values) / (values.len() as f64).sqrt()
}

/// Counts of (actual, predicted) label pairs.
///
/// Rows of the rendered table are actual labels, columns are predictions,
/// both in ascending order.
#[derive(Clone, Debug)]
pub struct ConfusionMatrix<L> {
    cells: BTreeMap<(L, L), u64>,
}

impl<L: Ord + Clone> ConfusionMatrix<L> {
    /// Create an empty matrix.
    pub fn new() -> Self {
        Self {
            cells: BTreeMap::new(),
        }
    }

    /// Record one (actual, predicted) observation.
    pub fn record(&mut self, actual: L, predicted: L) {
        *self.cells.entry((actual, predicted)).or_insert(0) += 1;
    }

    /// Observations of this (actual, predicted) pair; zero if unseen.
    pub fn count(&self, actual: &L, predicted: &L) -> u64 {
        self.cells
            .get(&(actual.clone(), predicted.clone()))
            .copied()
            .unwrap_or(0)
    }

    /// All labels seen in either role, ascending.
    pub fn labels(&self) -> Vec<&L> {
        let mut labels: Vec<&L> = Vec::new();
        for (actual, predicted) in self.cells.keys() {
            labels.push(actual);
            labels.push(predicted);
        }
        labels.sort();
        labels.dedup();
        labels
    }

    /// Total observations recorded.
    pub fn total(&self) -> u64 {
        self.cells.values().sum()
    }

    /// Share of observations on the diagonal; zero when empty.
    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let correct: u64 = self
            .cells
            .iter()
            .filter(|((actual, predicted), _)| actual == predicted)
            .map(|(_, &count)| count)
            .sum();
        correct as f64 / total as f64
    }
}

impl<L> Default for ConfusionMatrix<L> {
    fn default() -> Self {
        Self {
            cells: BTreeMap::new(),
        }
    }
}

impl<L: Ord + Clone + fmt::Display> fmt::Display for ConfusionMatrix<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels = self.labels();
        let names: Vec<String> = labels.iter().map(|label| label.to_string()).collect();
        let width = names.iter().map(String::len).max().unwrap_or(0).max(6);

        write!(f, "{:>width$}", "")?;
        for name in &names {
            write!(f, " {name:>width$}")?;
        }
        writeln!(f)?;
        for (i, &actual) in labels.iter().enumerate() {
            write!(f, "{:>width$}", names[i])?;
            for &predicted in &labels {
                write!(f, " {:>width$}", self.count(actual, predicted))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// One-sided empirical p-value for the observed prediction agreement.
///
/// Shuffles the actual labels `trials` times and counts shuffles agreeing
/// with the originals at least as much as `predicted` does.
pub fn permutation_test<T>(
    predicted: &[T],
    actual: &[T],
    trials: usize,
    seed: Option<u64>,
) -> Result<f64>
where
    T: PartialEq + Clone,
{
    if predicted.is_empty() {
        return Err(Error::EmptyInput);
    }
    if predicted.len() != actual.len() {
        return Err(Error::DimensionMismatch {
            expected: predicted.len(),
            found: actual.len(),
        });
    }
    if trials == 0 {
        return Err(Error::InvalidParameter {
            name: "trials",
            message: "must be at least 1",
        });
    }

    let observed = agreement(predicted, actual);
    let mut rng = seeded_rng(seed);
    let mut shuffled = actual.to_vec();
    let mut hits = 0usize;
    for _ in 0..trials {
        shuffled.shuffle(&mut rng);
        if agreement(predicted, &shuffled) >= observed {
            hits += 1;
        }
    }
    Ok((hits + 1) as f64 / (trials + 1) as f64)
}
