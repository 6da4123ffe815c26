//! Stopword detection and frequency comparison between corpora.
//!
//! High-frequency function words carry little content and drown out the
//! informative vocabulary. The two detectors here are the classic corpus
//! heuristics: take the most frequent terms overall, or take the terms that
//! appear in (almost) every document. Both produce a plain set that the
//! comparison and vectorization code can subtract.

use std::collections::HashSet;
use std::path::Path;

use super::counts::TermCounts;
use crate::error::Result;

/// The `n` most frequent terms of `counts`, as a set.
///
/// Works on raw occurrence counts and on document frequencies alike; pair
/// with [`document_frequencies`] for the document-based variant.
pub fn frequency_stoplist(counts: &TermCounts, n: usize) -> HashSet<String> {
    counts
        .most_common(n)
        .into_iter()
        .map(|(term, _)| term.to_string())
        .collect()
}

/// Count, for each term, the number of documents containing it at least once.
pub fn document_frequencies(docs: &[Vec<String>]) -> TermCounts {
    let mut frequencies = TermCounts::new();
    for doc in docs {
        let unique: HashSet<&str> = doc.iter().map(String::as_str).collect();
        for term in unique {
            frequencies.add(term);
        }
    }
    frequencies
}

/// One term's relative frequencies in two corpora.
#[derive(Clone, Debug)]
pub struct DivergenceEntry {
    /// The compared term.
    pub term: String,
    /// Relative frequency in corpus A.
    pub freq_a: f64,
    /// Relative frequency in corpus B.
    pub freq_b: f64,
    /// Absolute difference of the two frequencies.
    pub diff: f64,
}

/// Term-by-term frequency comparison of two corpora, most divergent first.
#[derive(Clone, Debug)]
pub struct DivergenceReport {
    entries: Vec<DivergenceEntry>,
}

impl DivergenceReport {
    /// All entries, ordered by descending divergence.
    pub fn entries(&self) -> &[DivergenceEntry] {
        &self.entries
    }

    /// The `n` most divergent entries.
    pub fn top(&self, n: usize) -> &[DivergenceEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// Write the report as a CSV file with a `term,freq_a,freq_b,diff` header.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(["term", "freq_a", "freq_b", "diff"])?;
        for entry in &self.entries {
            writer.write_record(&[
                entry.term.clone(),
                entry.freq_a.to_string(),
                entry.freq_b.to_string(),
                entry.diff.to_string(),
            ])?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Compare the relative term frequencies of corpus `a` against corpus `b`.
///
/// Every term of `a` that is not stoplisted gets an entry; a term missing
/// from `b` simply reads as frequency zero there. Entries are sorted by
/// descending difference, ties by term, so the report is reproducible.
pub fn frequency_divergence(
    a: &TermCounts,
    b: &TermCounts,
    stoplist: &HashSet<String>,
) -> DivergenceReport {
    let mut entries: Vec<DivergenceEntry> = a
        .iter()
        .filter(|(term, _)| !stoplist.contains(*term))
        .map(|(term, _)| {
            let freq_a = a.relative(term);
            let freq_b = b.relative(term);
            DivergenceEntry {
                term: term.to_string(),
                freq_a,
                freq_b,
                diff: (freq_a - freq_b).abs(),
            }
        })
        .collect();
    entries.sort_by(|x, y| x.diff.total_cmp(&y.diff).reverse().then_with(|| x.term.cmp(&y.term)));
    DivergenceReport { entries }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts_of(terms: &[&str]) -> TermCounts {
        let mut counts = TermCounts::new();
        counts.add_many(terms.iter().copied());
        counts
    }

    #[test]
    fn stoplist_takes_the_top_terms() {
        let counts = counts_of(&["the", "the", "the", "sea", "sea", "whale"]);
        let stoplist = frequency_stoplist(&counts, 2);
        assert!(stoplist.contains("the"));
        assert!(stoplist.contains("sea"));
        assert!(!stoplist.contains("whale"));
    }

    #[test]
    fn document_frequencies_count_documents_not_occurrences() {
        let docs = vec![
            vec!["the".to_string(), "the".to_string(), "sea".to_string()],
            vec!["the".to_string(), "ship".to_string()],
        ];
        let df = document_frequencies(&docs);
        assert_eq!(df.count("the"), 2);
        assert_eq!(df.count("sea"), 1);
        assert_eq!(df.count("ship"), 1);
    }

    #[test]
    fn divergence_skips_stoplisted_terms() {
        let a = counts_of(&["the", "whale", "whale", "sea"]);
        let b = counts_of(&["the", "garden", "garden", "sea"]);
        let stoplist: HashSet<String> = ["the".to_string()].into_iter().collect();

        let report = frequency_divergence(&a, &b, &stoplist);
        assert!(report.entries().iter().all(|e| e.term != "the"));

        // "whale" is half of corpus A and absent from B.
        let top = &report.top(1)[0];
        assert_eq!(top.term, "whale");
        assert!((top.freq_a - 0.5).abs() < 1e-12);
        assert_eq!(top.freq_b, 0.0);
        assert!((top.diff - 0.5).abs() < 1e-12);
    }

    #[test]
    fn divergence_orders_ties_by_term() {
        // "apple" and "pear" both occur once in A and never in B.
        let a = counts_of(&["pear", "apple"]);
        let b = counts_of(&["grape"]);
        let report = frequency_divergence(&a, &b, &HashSet::new());
        let terms: Vec<&str> = report.entries().iter().map(|e| e.term.as_str()).collect();
        assert_eq!(terms, vec!["apple", "pear"]);
    }

    #[test]
    fn report_round_trips_through_csv() {
        let a = counts_of(&["whale", "whale", "sea"]);
        let b = counts_of(&["garden"]);
        let report = frequency_divergence(&a, &b, &HashSet::new());

        let file = tempfile::NamedTempFile::new().unwrap();
        report.write_csv(file.path()).unwrap();

        let written = std::fs::read_to_string(file.path()).unwrap();
        let mut lines = written.lines();
        assert_eq!(lines.next(), Some("term,freq_a,freq_b,diff"));
        assert!(written.contains("whale"));
    }
}
