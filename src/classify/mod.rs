//! Supervised text classification and evaluation.
//!
//! The centerpiece is a multinomial [`NaiveBayes`] classifier over token
//! lists, with a bagged [`Ensemble`] wrapper for variance reduction. The
//! evaluation helpers split corpora, tabulate confusion matrices, and
//! attach a permutation-test p-value to an accuracy score; the entropy
//! tools grow small term-presence decision trees as an alternative, more
//! inspectable classifier.
//!
//! Everything here is deterministic given a seed, and every tie (between
//! scores, votes, or split terms) resolves to the smallest label or term.

mod bayes;
mod ensemble;
mod eval;
mod split;

pub use bayes::{epoch_of, NaiveBayes};
pub use ensemble::Ensemble;
pub use eval::{
    accuracy, agreement, mean, permutation_test, random_split, standard_error, std_dev, subsample,
    ConfusionMatrix,
};
pub use split::{entropy, grow_tree, split_score, LabeledDoc, SplitNode, SplitScore};
