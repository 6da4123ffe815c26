//! Multinomial naive Bayes over token lists.
//!
//! Each label accumulates a term counter; a document is scored against a
//! label by summing the log of each token's smoothed relative frequency
//! under that label. Additive smoothing keeps unseen tokens from zeroing a
//! whole score: with smoothing constant `a` and combined vocabulary size
//! `V`, a token seen `c` times in a label totaling `T` tokens contributes
//!
//! ```text
//! ln((c + a) / (T + a·V))
//! ```
//!
//! Scores are likelihoods only; no class prior enters, so balanced
//! training sets are assumed. Labels can be any ordered type: epoch start
//! years, author names, genres.
//!
//! # Determinism
//!
//! [`classify`](NaiveBayes::classify) walks labels in ascending order and
//! keeps the first best score, so exact ties always resolve to the
//! smallest label.

use std::collections::{BTreeMap, HashSet};

use crate::text::TermCounts;

/// Multinomial naive-Bayes classifier with additive smoothing.
#[derive(Clone, Debug)]
pub struct NaiveBayes<L> {
    classes: BTreeMap<L, TermCounts>,
    smoothing: f64,
}

impl<L: Ord> NaiveBayes<L> {
    /// Create a classifier with the default smoothing constant (0.001).
    pub fn new() -> Self {
        Self {
            classes: BTreeMap::new(),
            smoothing: 0.001,
        }
    }

    /// Set the additive smoothing constant.
    pub fn with_smoothing(mut self, smoothing: f64) -> Self {
        self.smoothing = smoothing;
        self
    }

    /// Add one labeled document to the training counts.
    pub fn train<S: AsRef<str>>(&mut self, label: L, tokens: &[S]) {
        let counts = self.classes.entry(label).or_default();
        counts.add_many(tokens.iter().map(|t| t.as_ref()));
    }

    /// Log-likelihood of `tokens` under `label`'s smoothed term
    /// distribution; negative infinity for an unseen label.
    pub fn log_score<S: AsRef<str>>(&self, label: &L, tokens: &[S]) -> f64 {
        match self.classes.get(label) {
            Some(counts) => score(counts, self.smoothing, self.vocabulary_size() as f64, tokens),
            None => f64::NEG_INFINITY,
        }
    }

    /// The best label for `tokens`, or `None` before any training.
    pub fn classify<S: AsRef<str>>(&self, tokens: &[S]) -> Option<&L> {
        let vocab = self.vocabulary_size() as f64;
        let mut best: Option<(&L, f64)> = None;
        for (label, counts) in &self.classes {
            let candidate = score(counts, self.smoothing, vocab, tokens);
            match best {
                Some((_, best_score)) if candidate <= best_score => {}
                _ => best = Some((label, candidate)),
            }
        }
        best.map(|(label, _)| label)
    }

    /// Labels seen during training, in ascending order.
    pub fn labels(&self) -> impl Iterator<Item = &L> {
        self.classes.keys()
    }

    /// Whether any document has been trained.
    pub fn is_trained(&self) -> bool {
        !self.classes.is_empty()
    }

    /// Number of distinct terms across all labels.
    fn vocabulary_size(&self) -> usize {
        let mut vocab: HashSet<&str> = HashSet::new();
        for counts in self.classes.values() {
            for (term, _) in counts.iter() {
                vocab.insert(term);
            }
        }
        vocab.len()
    }
}

impl<L: Ord> Default for NaiveBayes<L> {
    fn default() -> Self {
        Self::new()
    }
}

fn score<S: AsRef<str>>(counts: &TermCounts, smoothing: f64, vocab: f64, tokens: &[S]) -> f64 {
    let denom = counts.total() as f64 + smoothing * vocab;
    if denom <= 0.0 {
        return f64::NEG_INFINITY;
    }
    tokens
        .iter()
        .map(|token| {
            let count = counts.count(token.as_ref()) as f64;
            ((count + smoothing) / denom).ln()
        })
        .sum()
}

/// The start year of the fixed-length epoch containing `year`.
///
/// Integer division truncates, so years `start..start + epoch_len` all map
/// to `start`; 1777 with 25-year epochs gives 1775.
pub fn epoch_of(year: i32, epoch_len: i32) -> i32 {
    debug_assert!(epoch_len > 0, "epoch length must be positive");
    (year / epoch_len) * epoch_len
}
