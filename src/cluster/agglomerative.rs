//! Single-linkage agglomerative clustering.
//!
//! Bottom-up hierarchical clustering: every point starts as its own
//! cluster, and the two closest clusters merge repeatedly until `k`
//! clusters remain. Under single linkage the distance between two clusters
//! is the smallest pairwise distance between their members, so the global
//! minimum over all cross-cluster point pairs decides each merge.
//!
//! # Algorithm
//!
//! 1. Compute the full pairwise distance matrix.
//! 2. Start from the identity assignment: point `i` in cluster `i`.
//! 3. Repeat `n - k` times: scan every pair `i < j` whose points lie in
//!    different clusters, find the smallest distance, and merge the two
//!    clusters it connects by relabeling one side to the other.
//!
//! The matrix never changes after construction. Merged structure lives
//! entirely in the assignment vector; pairs inside one cluster are simply
//! skipped during the scan, so no entry needs to be invalidated.
//!
//! # Determinism
//!
//! Ties are resolved by scan order: among pairs at the minimum distance,
//! the lowest `(i, j)` in row-major order wins. The same input always
//! produces the same clusters.
//!
//! # Complexity
//!
//! Each merge rescans all pairs, so the total cost is O(n² · (n - k)) time
//! on top of the O(n²) matrix. That is intended for corpus-scale inputs
//! (hundreds of documents), not millions of points.
//!
//! Nothing here relies on the sequence of merge distances being
//! non-decreasing; clusters are read off at the final cut only.

use std::collections::{HashMap, HashSet};

use super::distance::{DistanceMatrix, Metric};
use super::traits::Clustering;
use crate::error::{Error, Result};

/// Single-linkage agglomerative clusterer.
#[derive(Debug, Clone)]
pub struct Agglomerative {
    k: usize,
    metric: Metric,
}

impl Agglomerative {
    /// Create a clusterer that merges until `k` clusters remain.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            metric: Metric::Euclidean,
        }
    }

    /// Set the distance metric (default: Euclidean).
    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    /// Fit and return clusters as member lists.
    ///
    /// Clusters are numbered `0..k` in order of their smallest member
    /// index; members are listed in ascending order.
    pub fn fit_groups(&self, data: &[Vec<f32>]) -> Result<Vec<Vec<usize>>> {
        let labels = self.fit_predict(data)?;
        let mut groups: Vec<Vec<usize>> = vec![Vec::new(); self.k];
        for (point, &label) in labels.iter().enumerate() {
            groups[label].push(point);
        }
        Ok(groups)
    }

    fn merge_until_k(&self, matrix: &DistanceMatrix, assign: &mut [usize]) {
        let n = assign.len();
        for _ in 0..(n - self.k) {
            let mut best_dist = f32::INFINITY;
            let mut best_pair: Option<(usize, usize)> = None;
            for i in 0..n {
                for j in (i + 1)..n {
                    if assign[i] == assign[j] {
                        continue;
                    }
                    let dist = matrix.get(i, j);
                    // Strictly-less keeps the first minimal pair in
                    // row-major order, so ties go to the lowest (i, j).
                    if dist < best_dist {
                        best_dist = dist;
                        best_pair = Some((i, j));
                    }
                }
            }

            let (i, j) = best_pair.expect("merge step must find a cross-cluster pair");
            let keep = assign[i];
            let absorb = assign[j];
            for label in assign.iter_mut() {
                if *label == absorb {
                    *label = keep;
                }
            }
        }
    }
}

impl Clustering for Agglomerative {
    fn fit_predict(&self, data: &[Vec<f32>]) -> Result<Vec<usize>> {
        let n = data.len();
        if n == 0 {
            return Err(Error::EmptyInput);
        }
        if self.k == 0 || self.k > n {
            return Err(Error::InvalidClusterCount {
                requested: self.k,
                n_items: n,
            });
        }

        let matrix = DistanceMatrix::compute(data, self.metric)?;

        // Identity assignment: every point is its own cluster.
        let mut assign: Vec<usize> = (0..n).collect();
        self.merge_until_k(&matrix, &mut assign);

        let distinct: HashSet<usize> = assign.iter().copied().collect();
        assert_eq!(
            distinct.len(),
            self.k,
            "merging must leave exactly k clusters"
        );

        Ok(compact_labels(&assign))
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}

/// Relabel arbitrary cluster ids to `0..k` in order of first appearance.
fn compact_labels(assign: &[usize]) -> Vec<usize> {
    let mut remap: HashMap<usize, usize> = HashMap::new();
    let mut labels = Vec::with_capacity(assign.len());
    for &id in assign {
        let next = remap.len();
        let label = *remap.entry(id).or_insert(next);
        labels.push(label);
    }
    labels
}
