//! Latent semantic analysis of a document-term matrix.
//!
//! A truncated singular value decomposition maps documents and terms into
//! a shared low-dimensional topic space where cosine similarity captures
//! co-occurrence structure: terms that appear in similar documents end up
//! close together even when they never co-occur directly.
//!
//! # Algorithm
//!
//! For a document-term matrix `A` (n docs by d terms), the document-side
//! Gram matrix `G = A·Aᵀ` is symmetric positive semi-definite and shares
//! its eigenvalues with the squared singular values of `A`. The top
//! factors are extracted one at a time by power iteration: repeatedly
//! multiply a start vector by `G` and normalize until the eigenvalue
//! estimate stabilizes, then deflate `G` by the found component and
//! repeat. Document coordinates are the eigenvectors scaled by their
//! singular values (`U·Σ`); term coordinates follow as `Aᵀ·U·Σ⁻¹`, so a
//! document-term dot product in topic space reconstructs the matrix.
//!
//! # Determinism
//!
//! Power iteration starts from fixed vectors (varied per factor so a
//! repeated start never sits orthogonal to every remaining eigenvector),
//! so fitting involves no randomness at all.
//!
//! # Complexity
//!
//! O(n²·d) to form the Gram matrix, then O(iterations·n²) per factor.
//! Suitable for corpora of up to a few thousand documents.

use crate::error::{Error, Result};

/// Truncated SVD factorization of a document-term matrix.
#[derive(Clone, Debug)]
pub struct Lsa {
    dimension: usize,
    max_iter: usize,
    tolerance: f32,
}

impl Lsa {
    /// Create a decomposition of the given number of topic dimensions.
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            max_iter: 500,
            tolerance: 1e-6,
        }
    }

    /// Set the per-factor power iteration cap.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the relative eigenvalue convergence threshold.
    pub fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Factorize a document-term matrix into topic space.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyInput`] for an empty matrix,
    /// [`Error::DimensionMismatch`] for ragged rows, and
    /// [`Error::InvalidParameter`] when the requested dimension is zero
    /// or exceeds `min(n_docs, n_terms)`.
    pub fn fit(&self, rows: &[Vec<f32>]) -> Result<LsaModel> {
        if rows.is_empty() {
            return Err(Error::EmptyInput);
        }
        let n = rows.len();
        let d = rows[0].len();
        if d == 0 {
            return Err(Error::InvalidParameter {
                name: "rows",
                message: "must have at least one column",
            });
        }
        for row in rows {
            if row.len() != d {
                return Err(Error::DimensionMismatch {
                    expected: d,
                    found: row.len(),
                });
            }
        }
        if self.dimension == 0 || self.dimension > n.min(d) {
            return Err(Error::InvalidParameter {
                name: "dimension",
                message: "must be in [1, min(docs, terms)]",
            });
        }
        if self.max_iter == 0 {
            return Err(Error::InvalidParameter {
                name: "max_iter",
                message: "must be at least 1",
            });
        }

        // Document-side Gram matrix, row-major and symmetric.
        let mut gram = vec![0.0f32; n * n];
        for i in 0..n {
            for j in i..n {
                let value = dot(&rows[i], &rows[j]);
                gram[i * n + j] = value;
                gram[j * n + i] = value;
            }
        }

        let mut singular_values = Vec::with_capacity(self.dimension);
        let mut eigenvectors: Vec<Vec<f32>> = Vec::with_capacity(self.dimension);
        for factor in 0..self.dimension {
            let (eigenvalue, vector) =
                power_iteration(&gram, n, factor, self.max_iter, self.tolerance);
            let eigenvalue = eigenvalue.max(0.0);
            deflate(&mut gram, n, eigenvalue, &vector);
            singular_values.push(eigenvalue.sqrt());
            eigenvectors.push(vector);
        }

        // doc_topic = U·Σ, term_topic = Aᵀ·U·Σ⁻¹.
        let mut doc_topic = vec![vec![0.0f32; self.dimension]; n];
        let mut term_topic = vec![vec![0.0f32; self.dimension]; d];
        for (k, vector) in eigenvectors.iter().enumerate() {
            let sigma = singular_values[k];
            for i in 0..n {
                doc_topic[i][k] = vector[i] * sigma;
            }
            if sigma <= f32::EPSILON {
                // A vanished factor contributes nothing to term space.
                continue;
            }
            for (i, row) in rows.iter().enumerate() {
                for t in 0..d {
                    term_topic[t][k] += row[t] * vector[i] / sigma;
                }
            }
        }

        Ok(LsaModel {
            singular_values,
            doc_topic,
            term_topic,
        })
    }
}

/// A fitted topic space: documents and terms as rows of coordinates.
#[derive(Clone, Debug)]
pub struct LsaModel {
    /// Singular values, largest first.
    pub singular_values: Vec<f32>,
    /// Per-document topic coordinates (`U·Σ`).
    pub doc_topic: Vec<Vec<f32>>,
    /// Per-term topic coordinates (`Aᵀ·U·Σ⁻¹`).
    pub term_topic: Vec<Vec<f32>>,
}

impl LsaModel {
    /// Number of topic dimensions.
    pub fn dimension(&self) -> usize {
        self.singular_values.len()
    }

    /// All other documents ranked by cosine similarity to `doc_index`,
    /// descending; ties break toward the lower index.
    pub fn closest_docs(&self, doc_index: usize) -> Result<Vec<(usize, f32)>> {
        if doc_index >= self.doc_topic.len() {
            return Err(Error::InvalidParameter {
                name: "doc_index",
                message: "out of range",
            });
        }
        let query = &self.doc_topic[doc_index];
        let mut ranked: Vec<(usize, f32)> = self
            .doc_topic
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != doc_index)
            .map(|(i, row)| (i, cosine(query, row)))
            .collect();
        ranked.sort_unstable_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        Ok(ranked)
    }

    /// All other terms ranked by cosine similarity to `query`,
    /// descending; ties break by term order.
    pub fn closest_terms(&self, vocab: &[String], query: &str) -> Result<Vec<(String, f32)>> {
        if vocab.len() != self.term_topic.len() {
            return Err(Error::DimensionMismatch {
                expected: self.term_topic.len(),
                found: vocab.len(),
            });
        }
        let index = match vocab.iter().position(|term| term == query) {
            Some(index) => index,
            None => {
                return Err(Error::InvalidParameter {
                    name: "query",
                    message: "term not in the vocabulary",
                })
            }
        };
        let target = &self.term_topic[index];
        let mut ranked: Vec<(String, f32)> = self
            .term_topic
            .iter()
            .enumerate()
            .filter(|(t, _)| *t != index)
            .map(|(t, row)| (vocab[t].clone(), cosine(target, row)))
            .collect();
        ranked.sort_unstable_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        Ok(ranked)
    }

    /// Terms ranked by absolute loading on one topic, descending; the
    /// signed loadings are returned.
    pub fn topic_terms(&self, vocab: &[String], topic: usize) -> Result<Vec<(String, f32)>> {
        if topic >= self.dimension() {
            return Err(Error::InvalidParameter {
                name: "topic",
                message: "out of range",
            });
        }
        if vocab.len() != self.term_topic.len() {
            return Err(Error::DimensionMismatch {
                expected: self.term_topic.len(),
                found: vocab.len(),
            });
        }
        let mut ranked: Vec<(String, f32)> = self
            .term_topic
            .iter()
            .enumerate()
            .map(|(t, row)| (vocab[t].clone(), row[topic]))
            .collect();
        ranked.sort_unstable_by(|a, b| {
            b.1.abs()
                .total_cmp(&a.1.abs())
                .then_with(|| a.0.cmp(&b.0))
        });
        Ok(ranked)
    }

    /// Squared Frobenius error of the rank-d reconstruction of `rows`.
    pub fn reconstruction_error(&self, rows: &[Vec<f32>]) -> Result<f64> {
        if rows.len() != self.doc_topic.len() {
            return Err(Error::DimensionMismatch {
                expected: self.doc_topic.len(),
                found: rows.len(),
            });
        }
        let d = self.term_topic.len();
        let mut error = 0.0f64;
        for (i, row) in rows.iter().enumerate() {
            if row.len() != d {
                return Err(Error::DimensionMismatch {
                    expected: d,
                    found: row.len(),
                });
            }
            for t in 0..d {
                let approx = dot(&self.doc_topic[i], &self.term_topic[t]);
                let diff = (row[t] - approx) as f64;
                error += diff * diff;
            }
        }
        Ok(error)
    }
}

/// Dominant eigenpair of a symmetric matrix by power iteration.
///
/// Returns a zero eigenvalue when the matrix annihilates the iterate,
/// which happens once the spectrum is exhausted.
fn power_iteration(
    gram: &[f32],
    n: usize,
    factor: usize,
    max_iter: usize,
    tolerance: f32,
) -> (f32, Vec<f32>) {
    // Fixed start, varied per factor so no single pattern can be
    // orthogonal to every eigenvector we chase.
    let mut v: Vec<f32> = (0..n)
        .map(|i| if i % (factor + 1) == 0 { 1.0 } else { 0.5 })
        .collect();
    normalize(&mut v);

    let mut eigenvalue = 0.0f32;
    for _ in 0..max_iter {
        let mut next = vec![0.0f32; n];
        for i in 0..n {
            next[i] = dot(&gram[i * n..(i + 1) * n], &v);
        }
        let norm = length(&next);
        if norm <= f32::EPSILON {
            return (0.0, v);
        }
        for value in next.iter_mut() {
            *value /= norm;
        }
        v = next;

        // The iterate's image norm converges to the eigenvalue.
        let new_eigenvalue = norm;
        if (new_eigenvalue - eigenvalue).abs() <= tolerance * new_eigenvalue.max(1.0) {
            return (new_eigenvalue, v);
        }
        eigenvalue = new_eigenvalue;
    }
    (eigenvalue, v)
}

/// Subtract `eigenvalue * u * uT` so the next factor dominates.
fn deflate(gram: &mut [f32], n: usize, eigenvalue: f32, u: &[f32]) {
    for i in 0..n {
        for j in 0..n {
            gram[i * n + j] -= eigenvalue * u[i] * u[j];
        }
    }
}

#[inline]
fn dot(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "vectors must have equal dimension");
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

#[inline]
fn length(v: &[f32]) -> f32 {
    dot(v, v).sqrt()
}

fn normalize(v: &mut [f32]) {
    let norm = length(v);
    if norm > f32::EPSILON {
        for value in v.iter_mut() {
            *value /= norm;
        }
    }
}

fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let norms = length(a) * length(b);
    if norms <= f32::EPSILON {
        return 0.0;
    }
    dot(a, b) / norms
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab(terms: &[&str]) -> Vec<String> {
        terms.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn rank_one_matrix_recovers_its_singular_value() {
        // Rows are multiples of (1, 2, 0), so the only singular value is
        // sqrt(5 + 20) = 5.
        let rows = vec![vec![1.0, 2.0, 0.0], vec![2.0, 4.0, 0.0]];
        let model = Lsa::new(1).fit(&rows).unwrap();

        assert_eq!(model.dimension(), 1);
        assert!((model.singular_values[0] - 5.0).abs() < 1e-3);
        assert!(model.reconstruction_error(&rows).unwrap() < 1e-4);
    }

    #[test]
    fn full_rank_fit_reconstructs_exactly() {
        let rows = vec![vec![3.0, 0.0], vec![0.0, 2.0]];
        let model = Lsa::new(2).with_tolerance(1e-9).fit(&rows).unwrap();
        assert!(model.reconstruction_error(&rows).unwrap() < 1e-6);
    }

    fn block_corpus() -> Vec<Vec<f32>> {
        // Two disjoint topics: terms 0..2 for docs 0..2, terms 2..4 for
        // docs 2..4.
        vec![
            vec![3.0, 1.0, 0.0, 0.0],
            vec![2.0, 2.0, 0.0, 0.0],
            vec![0.0, 0.0, 2.0, 1.0],
            vec![0.0, 0.0, 1.0, 2.0],
        ]
    }

    #[test]
    fn block_corpus_yields_separated_singular_values() {
        let model = Lsa::new(2).fit(&block_corpus()).unwrap();
        assert!((model.singular_values[0] - 4.1306).abs() < 1e-2);
        assert!((model.singular_values[1] - 3.0).abs() < 5e-2);
        assert!(model.singular_values[0] > model.singular_values[1]);
    }

    #[test]
    fn documents_sharing_a_topic_rank_closest() {
        let model = Lsa::new(2).fit(&block_corpus()).unwrap();
        let ranked = model.closest_docs(0).unwrap();
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].0, 1);
        assert!(ranked[0].1 > 0.9);
    }

    #[test]
    fn terms_sharing_a_topic_rank_closest() {
        let model = Lsa::new(2).fit(&block_corpus()).unwrap();
        let vocab = vocab(&["t0", "t1", "t2", "t3"]);
        let ranked = model.closest_terms(&vocab, "t0").unwrap();
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].0, "t1");
        assert!(ranked[0].1 > 0.9);
    }

    #[test]
    fn topic_terms_rank_by_loading() {
        let model = Lsa::new(2).fit(&block_corpus()).unwrap();
        let vocab = vocab(&["t0", "t1", "t2", "t3"]);
        let ranked = model.topic_terms(&vocab, 0).unwrap();
        assert_eq!(ranked[0].0, "t0");
        assert_eq!(ranked[1].0, "t1");
    }

    #[test]
    fn zero_documents_score_zero_similarity() {
        let rows = vec![vec![1.0, 0.0], vec![0.0, 0.0], vec![1.0, 0.0]];
        let model = Lsa::new(1).fit(&rows).unwrap();
        let ranked = model.closest_docs(0).unwrap();
        assert_eq!(ranked[0].0, 2);
        assert_eq!(ranked[1], (1, 0.0));
    }

    #[test]
    fn single_document_fits() {
        let rows = vec![vec![2.0, 1.0]];
        let model = Lsa::new(1).fit(&rows).unwrap();
        assert!((model.singular_values[0] - 5.0_f32.sqrt()).abs() < 1e-3);
        assert!(model.reconstruction_error(&rows).unwrap() < 1e-6);
    }

    #[test]
    fn dimension_bounds_are_enforced() {
        let rows = block_corpus();
        assert!(matches!(
            Lsa::new(0).fit(&rows),
            Err(Error::InvalidParameter {
                name: "dimension",
                ..
            })
        ));
        assert!(matches!(
            Lsa::new(5).fit(&rows),
            Err(Error::InvalidParameter {
                name: "dimension",
                ..
            })
        ));
    }

    #[test]
    fn malformed_input_is_rejected() {
        let empty: Vec<Vec<f32>> = Vec::new();
        assert!(matches!(Lsa::new(1).fit(&empty), Err(Error::EmptyInput)));

        let zero_width = vec![Vec::new()];
        assert!(Lsa::new(1).fit(&zero_width).is_err());

        let ragged = vec![vec![1.0, 2.0], vec![1.0]];
        assert!(matches!(
            Lsa::new(1).fit(&ragged),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn unknown_query_term_is_rejected() {
        let model = Lsa::new(1)
            .fit(&[vec![1.0, 2.0], vec![2.0, 1.0]])
            .unwrap();
        let vocab = vocab(&["t0", "t1"]);
        assert!(matches!(
            model.closest_terms(&vocab, "volcano"),
            Err(Error::InvalidParameter { name: "query", .. })
        ));
        assert!(model.closest_docs(9).is_err());
        assert!(model.topic_terms(&vocab, 1).is_err());
    }
}
