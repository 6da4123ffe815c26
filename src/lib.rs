//! Corpus statistics and clustering for word-frequency data.
//!
//! `quire` turns raw document text into word-count tables and provides
//! the small toolbox of algorithms usually pointed at such tables:
//!
//! - [`text`]: tokenization, term counting, stoplists
//! - [`corpus`]: document-term count tables with TSV storage
//! - [`cluster`]: single-linkage agglomerative clustering and k-means
//! - [`classify`]: naive Bayes, bagged ensembles, entropy splits, and
//!   evaluation (confusion matrices, permutation tests)
//! - [`lsa`]: latent semantic analysis by truncated SVD
//!
//! The modules stand alone; nothing forces table data through any
//! particular pipeline.

#![forbid(unsafe_code)]

pub mod classify;
pub mod cluster;
pub mod corpus;
pub mod error;
pub mod lsa;
pub mod text;

pub use cluster::{Agglomerative, Clustering, DistanceMatrix, Kmeans, KmeansFit, Metric};
pub use error::{Error, Result};
