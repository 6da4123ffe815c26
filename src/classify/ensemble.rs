//! Bagged ensembles of naive-Bayes classifiers.
//!
//! Each member trains on a random subsample of the corpus: every document
//! is independently dropped with probability `drop_fraction` per member,
//! so members see different slices of the data and disagree in useful
//! ways. Classification is a majority vote over member predictions.
//!
//! # Determinism
//!
//! A seeded ensemble draws all of its subsamples from one generator in
//! member order, so the same seed always yields the same members. Vote
//! ties resolve to the smallest label.

use rand::prelude::*;
use rand::rngs::StdRng;

use std::collections::BTreeMap;

use crate::classify::NaiveBayes;
use crate::error::{Error, Result};

/// Majority-vote ensemble of [`NaiveBayes`] members trained on random
/// subsamples.
#[derive(Debug)]
pub struct Ensemble<L> {
    size: usize,
    drop_fraction: f64,
    smoothing: f64,
    seed: Option<u64>,
    members: Vec<NaiveBayes<L>>,
}

impl<L: Ord + Clone> Ensemble<L> {
    /// Create an untrained ensemble of `size` members.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            drop_fraction: 0.5,
            smoothing: 0.001,
            seed: None,
            members: Vec::new(),
        }
    }

    /// Set the per-member probability of dropping each document.
    pub fn with_drop_fraction(mut self, drop_fraction: f64) -> Self {
        self.drop_fraction = drop_fraction;
        self
    }

    /// Set the smoothing constant passed to every member.
    pub fn with_smoothing(mut self, smoothing: f64) -> Self {
        self.smoothing = smoothing;
        self
    }

    /// Set a seed for reproducible subsampling.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Train all members, one subsample each, replacing any prior
    /// training.
    pub fn train<S: AsRef<str>>(&mut self, docs: &[Vec<S>], labels: &[L]) -> Result<()> {
        if docs.is_empty() {
            return Err(Error::EmptyInput);
        }
        if docs.len() != labels.len() {
            return Err(Error::InvalidParameter {
                name: "labels",
                message: "must have one label per document",
            });
        }
        if self.size == 0 {
            return Err(Error::InvalidParameter {
                name: "size",
                message: "must be at least 1",
            });
        }
        if !(0.0..1.0).contains(&self.drop_fraction) {
            return Err(Error::InvalidParameter {
                name: "drop_fraction",
                message: "must be in [0, 1)",
            });
        }

        let mut rng: Box<dyn RngCore> = match self.seed {
            Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
            None => Box::new(rand::rng()),
        };

        self.members = (0..self.size)
            .map(|_| {
                let mut member = NaiveBayes::new().with_smoothing(self.smoothing);
                for (tokens, label) in docs.iter().zip(labels) {
                    if rng.random::<f64>() >= self.drop_fraction {
                        member.train(label.clone(), tokens);
                    }
                }
                member
            })
            .collect();
        Ok(())
    }

    /// Majority vote over member predictions, or `None` if the ensemble
    /// is untrained or no member commits to a label.
    pub fn vote<S: AsRef<str>>(&self, tokens: &[S]) -> Option<L> {
        let mut tally: BTreeMap<&L, usize> = BTreeMap::new();
        for member in &self.members {
            if let Some(label) = member.classify(tokens) {
                *tally.entry(label).or_insert(0) += 1;
            }
        }
        let mut best: Option<(&L, usize)> = None;
        for (label, votes) in tally {
            match best {
                Some((_, best_votes)) if votes <= best_votes => {}
                _ => best = Some((label, votes)),
            }
        }
        best.map(|(label, _)| label.clone())
    }

    /// Number of trained members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the ensemble has been trained.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The trained members, in training order.
    pub fn members(&self) -> &[NaiveBayes<L>] {
        &self.members
    }
}
