//! Clustering for documents represented as dense count vectors.
//!
//! The algorithms here take rows of `f32` features (typically normalized
//! word counts from [`corpus`](crate::corpus)) and group similar rows.
//!
//! ## Algorithms
//!
//! ### Agglomerative (single linkage)
//!
//! Bottom-up merging: start with one cluster per document and repeatedly
//! merge the two clusters whose closest members are closest, until `k`
//! clusters remain. Single linkage chains well through elongated groups
//! and its merge order is easy to inspect, which makes it the right tool
//! for small corpora where you want to read the hierarchy.
//!
//! ### K-means
//!
//! The classic flat alternative: assign each point to the nearest
//! centroid, then update centroids to the mean of their points. Repeat.
//! Faster on large inputs, but assumes roughly spherical clusters and a
//! sensible `k`.
//!
//! Both implement [`Clustering`], so callers can swap one for the other.
//! [`DistanceMatrix`] and [`closest_pairs`] expose the shared geometry for
//! direct inspection.
//!
//! ## Usage
//!
//! ```rust
//! use quire::cluster::{Agglomerative, Clustering, Kmeans};
//!
//! let data = vec![
//!     vec![0.0, 0.0],
//!     vec![0.0, 1.0],
//!     vec![5.0, 5.0],
//!     vec![5.0, 6.0],
//! ];
//!
//! // Merge until two clusters remain.
//! let groups = Agglomerative::new(2).fit_groups(&data).unwrap();
//! assert_eq!(groups, vec![vec![0, 1], vec![2, 3]]);
//!
//! // Flat k-means over the same points.
//! let labels = Kmeans::new(2).with_seed(42).fit_predict(&data).unwrap();
//! assert_eq!(labels[0], labels[1]);
//! assert_ne!(labels[0], labels[2]);
//! ```

mod agglomerative;
mod distance;
mod kmeans;
mod traits;

pub use agglomerative::Agglomerative;
pub use distance::{closest_pairs, DistanceMatrix, Metric, Pair};
pub use kmeans::{Kmeans, KmeansFit};
pub use traits::Clustering;
