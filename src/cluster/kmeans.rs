//! K-means clustering with random-partition initialization.
//!
//! The classic Lloyd iteration: average each cluster into a centroid, move
//! every point to its nearest centroid, repeat until assignments stop
//! changing or the iteration cap is hit.
//!
//! **Objective**: minimize the within-cluster sum of squares:
//!
//! ```text
//! J = Σ_k Σ_{x ∈ C_k} ||x - μ_k||²
//! ```
//!
//! Initialization assigns every point to a uniformly random cluster and
//! averages those random groups into the first centroids. A cluster that
//! loses all of its points restarts from a randomly chosen data point
//! instead of keeping a stale centroid. Seed the run for reproducibility.
//!
//! **Assumptions**: roughly spherical clusters of similar size, and `k`
//! known in advance. For merging by nearest neighbors instead, see
//! [`Agglomerative`](super::Agglomerative).

use rand::prelude::*;

use super::distance::Metric;
use super::traits::Clustering;
use crate::error::{Error, Result};

/// K-means clusterer.
#[derive(Debug, Clone)]
pub struct Kmeans {
    k: usize,
    max_iter: usize,
    seed: Option<u64>,
}

/// A fitted k-means model.
#[derive(Debug, Clone)]
pub struct KmeansFit {
    /// One cluster label per input point.
    pub labels: Vec<usize>,
    /// Cluster centroids, one per cluster.
    pub centroids: Vec<Vec<f32>>,
    /// Summed point-to-centroid distance at the final assignment.
    pub total_distance: f32,
    /// Number of Lloyd iterations performed.
    pub iterations: usize,
}

impl Kmeans {
    /// Create a new k-means clusterer with `k` clusters.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iter: 100,
            seed: None,
        }
    }

    /// Set the iteration cap (default: 100).
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the RNG seed for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Fit and return the full model.
    pub fn fit(&self, data: &[Vec<f32>]) -> Result<KmeansFit> {
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
        if self.max_iter == 0 {
            return Err(Error::InvalidParameter {
                name: "max_iter",
                message: "must be at least 1",
            });
        }

        let d = data[0].len();
        if d == 0 {
            return Err(Error::InvalidParameter {
                name: "dimension",
                message: "must be at least 1",
            });
        }
        for point in data.iter().skip(1) {
            if point.len() != d {
                return Err(Error::DimensionMismatch {
                    expected: d,
                    found: point.len(),
                });
            }
        }

        let mut rng: Box<dyn RngCore> = match self.seed {
            Some(s) => Box::new(StdRng::seed_from_u64(s)),
            None => Box::new(rand::rng()),
        };

        // Random initial partition: every point joins a random cluster.
        let mut labels: Vec<usize> = (0..n).map(|_| rng.random_range(0..self.k)).collect();

        let mut centroids = vec![vec![0.0f32; d]; self.k];
        let mut iterations = 0;
        let mut total_distance = 0.0f32;

        for step in 0..self.max_iter {
            iterations = step + 1;
            update_centroids(data, &labels, &mut centroids, &mut rng);

            let (new_labels, dist) = assign_points(data, &centroids);
            total_distance = dist;
            let converged = new_labels == labels;
            labels = new_labels;
            if converged {
                break;
            }
        }

        Ok(KmeansFit {
            labels,
            centroids,
            total_distance,
            iterations,
        })
    }
}

impl Clustering for Kmeans {
    fn fit_predict(&self, data: &[Vec<f32>]) -> Result<Vec<usize>> {
        Ok(self.fit(data)?.labels)
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}

/// Average each cluster's members into its centroid.
///
/// An empty cluster restarts from a randomly chosen data point.
fn update_centroids(
    data: &[Vec<f32>],
    labels: &[usize],
    centroids: &mut [Vec<f32>],
    rng: &mut dyn RngCore,
) {
    let d = data[0].len();
    let k = centroids.len();

    let mut sums = vec![vec![0.0f32; d]; k];
    let mut counts = vec![0usize; k];
    for (point, &label) in data.iter().zip(labels.iter()) {
        counts[label] += 1;
        for (sum, &x) in sums[label].iter_mut().zip(point.iter()) {
            *sum += x;
        }
    }

    for c in 0..k {
        if counts[c] == 0 {
            let pick = rng.random_range(0..data.len());
            centroids[c].copy_from_slice(&data[pick]);
        } else {
            for (dst, &sum) in centroids[c].iter_mut().zip(sums[c].iter()) {
                *dst = sum / counts[c] as f32;
            }
        }
    }
}

/// Move every point to its nearest centroid.
///
/// Returns the new labels and the summed point-to-centroid distance.
/// Equidistant centroids resolve to the lowest cluster index.
fn assign_points(data: &[Vec<f32>], centroids: &[Vec<f32>]) -> (Vec<usize>, f32) {
    let mut labels = Vec::with_capacity(data.len());
    let mut total = 0.0f32;

    for point in data {
        let mut best = 0usize;
        let mut best_dist = f32::INFINITY;
        for (c, centroid) in centroids.iter().enumerate() {
            let dist = Metric::Euclidean.between(point, centroid);
            if dist < best_dist {
                best_dist = dist;
                best = c;
            }
        }
        labels.push(best);
        total += best_dist;
    }

    (labels, total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separates_two_blobs() {
        let data = vec![
            vec![0.0, 0.0],
            vec![0.1, 0.1],
            vec![0.2, 0.0],
            vec![10.0, 10.0],
            vec![10.1, 10.1],
            vec![9.9, 10.2],
        ];
        let labels = Kmeans::new(2).with_seed(42).fit_predict(&data).unwrap();

        assert_eq!(labels[0], labels[1]);
        assert_eq!(labels[0], labels[2]);
        assert_eq!(labels[3], labels[4]);
        assert_eq!(labels[3], labels[5]);
        assert_ne!(labels[0], labels[3]);
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let data: Vec<Vec<f32>> = (0..20)
            .map(|i| vec![(i % 5) as f32, (i / 5) as f32])
            .collect();

        let a = Kmeans::new(3).with_seed(7).fit(&data).unwrap();
        let b = Kmeans::new(3).with_seed(7).fit(&data).unwrap();
        assert_eq!(a.labels, b.labels);
        assert_eq!(a.iterations, b.iterations);
    }

    #[test]
    fn fit_reports_centroids_and_distance() {
        let data = vec![vec![0.0], vec![0.0], vec![8.0], vec![8.0]];
        let fit = Kmeans::new(2).with_seed(1).fit(&data).unwrap();

        assert_eq!(fit.labels.len(), 4);
        assert_eq!(fit.centroids.len(), 2);
        assert!(fit.iterations >= 1);
        // The only stable split puts the two zeros and the two eights
        // together, and then every point sits on its centroid.
        assert!(fit.total_distance.abs() < 1e-6);
        assert_eq!(fit.labels[0], fit.labels[1]);
        assert_eq!(fit.labels[2], fit.labels[3]);
        assert_ne!(fit.labels[0], fit.labels[2]);
    }

    #[test]
    fn k_equals_one_gives_one_cluster() {
        let data = vec![vec![0.0], vec![5.0], vec![10.0]];
        let labels = Kmeans::new(1).with_seed(3).fit_predict(&data).unwrap();
        assert_eq!(labels, vec![0, 0, 0]);
    }

    #[test]
    fn empty_input_rejected() {
        let data: Vec<Vec<f32>> = vec![];
        assert!(Kmeans::new(2).fit_predict(&data).is_err());
    }

    #[test]
    fn zero_clusters_rejected() {
        let data = vec![vec![0.0]];
        let err = Kmeans::new(0).fit_predict(&data).unwrap_err();
        assert!(matches!(err, Error::InvalidClusterCount { requested: 0, .. }));
    }

    #[test]
    fn more_clusters_than_points_rejected() {
        let data = vec![vec![0.0], vec![1.0]];
        let err = Kmeans::new(5).fit_predict(&data).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidClusterCount {
                requested: 5,
                n_items: 2
            }
        ));
    }

    #[test]
    fn zero_max_iter_rejected() {
        let data = vec![vec![0.0], vec![1.0]];
        let err = Kmeans::new(2).with_max_iter(0).fit_predict(&data).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name: "max_iter", .. }));
    }

    #[test]
    fn ragged_rows_rejected() {
        let data = vec![vec![0.0, 0.0], vec![1.0]];
        assert!(Kmeans::new(1).fit_predict(&data).is_err());
    }
}
