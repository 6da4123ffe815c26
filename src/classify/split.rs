//! Entropy-based corpus splitting.
//!
//! A split partitions documents by whether they contain a term. Good
//! split terms are the ones whose partitions have low combined label
//! entropy: mostly-one-label groups score low, mixed groups score high.
//! Growing splits recursively yields a small decision tree over term
//! presence.
//!
//! Entropy of label counts `n_1..n_m` with `N = Σ n_i` is computed in the
//! algebraically equivalent form
//!
//! ```text
//! (N·ln N − Σ n_i·ln n_i) / N
//! ```
//!
//! which avoids dividing each count by the total first.
//!
//! # Determinism
//!
//! Candidate terms are scored in sorted order with strict improvement, so
//! equally scoring terms resolve to the lexicographically smallest.

use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Shannon entropy, in nats, of a label count distribution.
///
/// Zero counts contribute nothing; an empty or all-zero distribution has
/// zero entropy.
pub fn entropy(counts: &[u64]) -> f64 {
    let total: u64 = counts.iter().sum();
    if total == 0 {
        return 0.0;
    }
    let n = total as f64;
    let sum: f64 = counts
        .iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let c = count as f64;
            c * c.ln()
        })
        .sum();
    (n * n.ln() - sum) / n
}

/// A tokenized document paired with its label.
#[derive(Clone, Debug)]
pub struct LabeledDoc<L> {
    /// Tokens of the document, in order.
    pub tokens: Vec<String>,
    /// The document's label.
    pub label: L,
}

impl<L> LabeledDoc<L> {
    /// Build a labeled document from anything yielding string-likes.
    pub fn new<I, S>(tokens: I, label: L) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
            label,
        }
    }
}

/// The quality of splitting a corpus on one term.
#[derive(Clone, Debug)]
pub struct SplitScore {
    /// The term split on.
    pub term: String,
    /// Documents containing the term.
    pub with_size: usize,
    /// Documents not containing the term.
    pub without_size: usize,
    /// Label entropy of the containing side.
    pub with_entropy: f64,
    /// Label entropy of the non-containing side.
    pub without_entropy: f64,
}

impl SplitScore {
    /// Size-weighted total entropy of the two sides. Lower is better.
    pub fn score(&self) -> f64 {
        self.with_size as f64 * self.with_entropy + self.without_size as f64 * self.without_entropy
    }
}

/// Score splitting `docs` on `term`, or `None` when either side would be
/// empty.
pub fn split_score<L: Ord>(docs: &[&LabeledDoc<L>], term: &str) -> Option<SplitScore> {
    let mut with_counts: BTreeMap<&L, u64> = BTreeMap::new();
    let mut without_counts: BTreeMap<&L, u64> = BTreeMap::new();
    for doc in docs {
        let has_term = doc.tokens.iter().any(|token| token == term);
        let side = if has_term {
            &mut with_counts
        } else {
            &mut without_counts
        };
        *side.entry(&doc.label).or_insert(0) += 1;
    }
    if with_counts.is_empty() || without_counts.is_empty() {
        return None;
    }

    let with: Vec<u64> = with_counts.values().copied().collect();
    let without: Vec<u64> = without_counts.values().copied().collect();
    Some(SplitScore {
        term: term.to_string(),
        with_size: with.iter().sum::<u64>() as usize,
        without_size: without.iter().sum::<u64>() as usize,
        with_entropy: entropy(&with),
        without_entropy: entropy(&without),
    })
}

/// One node of a term-presence decision tree.
#[derive(Clone, Debug)]
pub struct SplitNode {
    /// The term this node splits on; `None` at leaves.
    pub term: Option<String>,
    /// Documents reaching this node.
    pub size: usize,
    /// Label entropy of those documents.
    pub entropy: f64,
    /// Subtree for documents containing the term.
    pub with_term: Option<Box<SplitNode>>,
    /// Subtree for documents lacking the term.
    pub without_term: Option<Box<SplitNode>>,
}

impl SplitNode {
    /// Whether this node splits no further.
    pub fn is_leaf(&self) -> bool {
        self.term.is_none()
    }

    /// Total number of nodes in this subtree.
    pub fn node_count(&self) -> usize {
        let mut count = 1;
        if let Some(node) = &self.with_term {
            count += node.node_count();
        }
        if let Some(node) = &self.without_term {
            count += node.node_count();
        }
        count
    }
}

/// Grow a decision tree over term presence, depth-limited.
///
/// At each node the candidate term with the lowest size-weighted entropy
/// is chosen; growth stops at `max_depth`, at pure nodes, and where no
/// candidate separates the documents.
pub fn grow_tree<L: Ord>(
    docs: &[LabeledDoc<L>],
    candidate_terms: &[String],
    max_depth: usize,
) -> Result<SplitNode> {
    if docs.is_empty() {
        return Err(Error::EmptyInput);
    }
    let mut terms: Vec<&str> = candidate_terms.iter().map(String::as_str).collect();
    terms.sort_unstable();
    terms.dedup();

    let refs: Vec<&LabeledDoc<L>> = docs.iter().collect();
    Ok(grow_node(&refs, &terms, max_depth))
}

fn grow_node<L: Ord>(docs: &[&LabeledDoc<L>], terms: &[&str], depth: usize) -> SplitNode {
    let mut label_counts: BTreeMap<&L, u64> = BTreeMap::new();
    for doc in docs {
        *label_counts.entry(&doc.label).or_insert(0) += 1;
    }
    let counts: Vec<u64> = label_counts.values().copied().collect();
    let node_entropy = entropy(&counts);

    let mut node = SplitNode {
        term: None,
        size: docs.len(),
        entropy: node_entropy,
        with_term: None,
        without_term: None,
    };
    if depth == 0 || node_entropy <= 0.0 {
        return node;
    }

    // Terms arrive sorted, so strict improvement keeps the smallest.
    let mut best: Option<(&str, f64)> = None;
    for &term in terms {
        if let Some(split) = split_score(docs, term) {
            let score = split.score();
            match best {
                Some((_, best_score)) if score >= best_score => {}
                _ => best = Some((term, score)),
            }
        }
    }
    let term = match best {
        Some((term, _)) => term,
        None => return node,
    };

    let (with, without): (Vec<&LabeledDoc<L>>, Vec<&LabeledDoc<L>>) = docs
        .iter()
        .copied()
        .partition(|doc| doc.tokens.iter().any(|token| token == term));

    node.term = Some(term.to_string());
    node.with_term = Some(Box::new(grow_node(&with, terms, depth - 1)));
    node.without_term = Some(Box::new(grow_node(&without, terms, depth - 1)));
    node
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(text: &str, label: &'static str) -> LabeledDoc<&'static str> {
        LabeledDoc::new(text.split_whitespace(), label)
    }

    #[test]
    fn entropy_of_even_two_way_split_is_ln_two() {
        let h = entropy(&[5, 5]);
        assert!((h - 2.0_f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn entropy_of_pure_counts_is_zero() {
        assert_eq!(entropy(&[7]), 0.0);
        assert_eq!(entropy(&[7, 0, 0]), 0.0);
        assert_eq!(entropy(&[]), 0.0);
    }

    #[test]
    fn entropy_grows_with_mixing() {
        assert!(entropy(&[9, 1]) < entropy(&[6, 4]));
        assert!(entropy(&[6, 4]) < entropy(&[5, 5]));
    }

    #[test]
    fn split_score_requires_both_sides() {
        let docs = vec![doc("wave ship", "sea"), doc("wave salt", "sea")];
        let refs: Vec<&LabeledDoc<&str>> = docs.iter().collect();
        assert!(split_score(&refs, "wave").is_none());
        assert!(split_score(&refs, "volcano").is_none());
    }

    #[test]
    fn perfect_split_scores_zero() {
        let docs = vec![
            doc("wave ship", "sea"),
            doc("wave salt", "sea"),
            doc("field barn", "land"),
            doc("plough barn", "land"),
        ];
        let refs: Vec<&LabeledDoc<&str>> = docs.iter().collect();
        let split = split_score(&refs, "barn").unwrap();
        assert_eq!(split.with_size, 2);
        assert_eq!(split.without_size, 2);
        assert_eq!(split.score(), 0.0);
    }

    #[test]
    fn tree_picks_the_separating_term() {
        let docs = vec![
            doc("wave ship harbour", "sea"),
            doc("wave salt ship", "sea"),
            doc("field barn soil", "land"),
            doc("plough barn field", "land"),
        ];
        let terms: Vec<String> = ["ship", "barn", "field", "wave"]
            .iter()
            .map(|t| t.to_string())
            .collect();

        let tree = grow_tree(&docs, &terms, 3).unwrap();
        // Every candidate splits perfectly here, so the smallest term
        // wins the tie.
        assert_eq!(tree.term.as_deref(), Some("barn"));
        assert!((tree.entropy - 2.0_f64.ln()).abs() < 1e-12);

        let with = tree.with_term.as_ref().unwrap();
        let without = tree.without_term.as_ref().unwrap();
        assert!(with.is_leaf());
        assert!(without.is_leaf());
        assert_eq!(with.entropy, 0.0);
        assert_eq!(without.entropy, 0.0);
    }

    #[test]
    fn zero_depth_yields_a_leaf() {
        let docs = vec![doc("wave", "sea"), doc("barn", "land")];
        let terms = vec!["wave".to_string()];
        let tree = grow_tree(&docs, &terms, 0).unwrap();
        assert!(tree.is_leaf());
        assert_eq!(tree.size, 2);
        assert_eq!(tree.node_count(), 1);
    }

    #[test]
    fn pure_nodes_stop_growing() {
        let docs = vec![doc("wave ship", "sea"), doc("wave salt", "sea")];
        let terms = vec!["ship".to_string()];
        let tree = grow_tree(&docs, &terms, 5).unwrap();
        assert!(tree.is_leaf());
        assert_eq!(tree.entropy, 0.0);
    }

    #[test]
    fn empty_corpus_is_rejected() {
        let docs: Vec<LabeledDoc<&str>> = Vec::new();
        assert!(grow_tree(&docs, &[], 3).is_err());
    }
}
