//! Dense document-term count tables.
//!
//! A [`CountTable`] holds one corpus in the layout the clustering and
//! factorization code expects: a shared vocabulary, one metadata triple per
//! document, and one count row per document with exactly one cell per
//! vocabulary term.
//!
//! # On-disk format
//!
//! Tables serialize as tab-separated text. The header row is
//! `title<TAB>author<TAB>year` followed by the vocabulary; each data row
//! carries the three metadata fields and then the counts, in vocabulary
//! order. Malformed rows are rejected at load time with their zero-based
//! data-row index; nothing is skipped or repaired silently.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{Error, Result};
use crate::text::{TermCounts, Tokenizer};

/// Identifying metadata for one document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocInfo {
    /// Document title.
    pub title: String,
    /// Author name.
    pub author: String,
    /// Publication year.
    pub year: i32,
}

impl DocInfo {
    /// Convenience constructor.
    pub fn new(title: &str, author: &str, year: i32) -> Self {
        Self {
            title: title.to_string(),
            author: author.to_string(),
            year,
        }
    }
}

/// A document-term count table with a shared vocabulary.
#[derive(Clone, Debug)]
pub struct CountTable {
    vocab: Vec<String>,
    docs: Vec<DocInfo>,
    rows: Vec<Vec<f32>>,
}

impl CountTable {
    /// Build a table from raw document texts.
    ///
    /// The vocabulary is the `vocab_size` most frequent terms across the
    /// whole corpus (ties broken by term order); counts outside it are
    /// dropped. `texts[i]` is the text for `docs[i]`.
    pub fn from_texts<S: AsRef<str>>(
        docs: Vec<DocInfo>,
        texts: &[S],
        tokenizer: &Tokenizer,
        vocab_size: usize,
    ) -> Result<Self> {
        if docs.is_empty() {
            return Err(Error::EmptyInput);
        }
        if docs.len() != texts.len() {
            return Err(Error::InvalidParameter {
                name: "texts",
                message: "must have one text per document",
            });
        }
        if vocab_size == 0 {
            return Err(Error::InvalidParameter {
                name: "vocab_size",
                message: "must be at least 1",
            });
        }

        let token_lists: Vec<Vec<String>> = texts
            .iter()
            .map(|text| tokenizer.tokenize(text.as_ref()))
            .collect();

        let mut corpus_counts = TermCounts::new();
        for tokens in &token_lists {
            corpus_counts.add_many(tokens.iter().map(String::as_str));
        }

        let vocab: Vec<String> = corpus_counts
            .most_common(vocab_size)
            .into_iter()
            .map(|(term, _)| term.to_string())
            .collect();

        let index: HashMap<&str, usize> = vocab
            .iter()
            .enumerate()
            .map(|(i, term)| (term.as_str(), i))
            .collect();

        let mut rows = Vec::with_capacity(token_lists.len());
        for tokens in &token_lists {
            let mut row = vec![0.0f32; vocab.len()];
            for token in tokens {
                if let Some(&i) = index.get(token.as_str()) {
                    row[i] += 1.0;
                }
            }
            rows.push(row);
        }

        Ok(Self { vocab, docs, rows })
    }

    /// Load a table from a tab-separated file.
    ///
    /// Rows that do not match the header width, non-numeric count cells,
    /// and non-integer years are [`Error::DataFormat`] with the offending
    /// zero-based data-row index.
    pub fn read_tsv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .from_path(path)?;

        let mut records = reader.records();
        let header = match records.next() {
            Some(record) => record?,
            None => {
                return Err(Error::DataFormat {
                    row: 0,
                    message: "missing header row".to_string(),
                })
            }
        };
        if header.len() < 3 {
            return Err(Error::DataFormat {
                row: 0,
                message: "header needs title, author and year columns".to_string(),
            });
        }
        let vocab: Vec<String> = header.iter().skip(3).map(str::to_string).collect();
        let width = header.len();

        let mut docs = Vec::new();
        let mut rows = Vec::new();
        for (idx, record) in records.enumerate() {
            let record = record?;
            if record.len() != width {
                return Err(Error::DataFormat {
                    row: idx,
                    message: format!("expected {width} cells, found {}", record.len()),
                });
            }

            let year: i32 = record[2].trim().parse().map_err(|_| Error::DataFormat {
                row: idx,
                message: format!("year {:?} is not an integer", &record[2]),
            })?;

            let mut row = Vec::with_capacity(vocab.len());
            for cell in record.iter().skip(3) {
                let count: f32 = cell.trim().parse().map_err(|_| Error::DataFormat {
                    row: idx,
                    message: format!("count {cell:?} is not numeric"),
                })?;
                row.push(count);
            }

            docs.push(DocInfo {
                title: record[0].to_string(),
                author: record[1].to_string(),
                year,
            });
            rows.push(row);
        }

        Ok(Self { vocab, docs, rows })
    }

    /// Write the table as a tab-separated file, the inverse of
    /// [`read_tsv`](CountTable::read_tsv).
    pub fn write_tsv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .from_path(path)?;

        let mut header: Vec<&str> = vec!["title", "author", "year"];
        header.extend(self.vocab.iter().map(String::as_str));
        writer.write_record(&header)?;

        for (doc, row) in self.docs.iter().zip(&self.rows) {
            let mut record: Vec<String> = Vec::with_capacity(3 + row.len());
            record.push(doc.title.clone());
            record.push(doc.author.clone());
            record.push(doc.year.to_string());
            record.extend(row.iter().map(|count| count.to_string()));
            writer.write_record(&record)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// The shared vocabulary, in column order.
    pub fn vocab(&self) -> &[String] {
        &self.vocab
    }

    /// Document metadata, in row order.
    pub fn docs(&self) -> &[DocInfo] {
        &self.docs
    }

    /// Count rows, one per document.
    pub fn rows(&self) -> &[Vec<f32>] {
        &self.rows
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Whether the table has no documents.
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Number of vocabulary terms (row width).
    pub fn n_terms(&self) -> usize {
        self.vocab.len()
    }

    /// Count rows rescaled to relative frequencies.
    pub fn normalized_rows(&self) -> Result<Vec<Vec<f32>>> {
        normalize_rows(&self.rows)
    }
}

/// Scale each row to sum to one.
///
/// A row with no mass at all cannot be normalized; it is rejected with its
/// index instead of silently turning into NaN.
pub fn normalize_rows(rows: &[Vec<f32>]) -> Result<Vec<Vec<f32>>> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let total: f32 = row.iter().sum();
            if total <= 0.0 {
                return Err(Error::DataFormat {
                    row: i,
                    message: "zero feature mass, cannot normalize".to_string(),
                });
            }
            Ok(row.iter().map(|count| count / total).collect())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn sample_table() -> CountTable {
        let docs = vec![
            DocInfo::new("Mild Seas", "A. Hull", 1851),
            DocInfo::new("Quiet Lanes", "B. Marsh", 1813),
        ];
        let texts = [
            "the sea the sea and the ship",
            "the garden and the lane",
        ];
        CountTable::from_texts(docs, &texts, &Tokenizer::new(), 10).unwrap()
    }

    #[test]
    fn test_from_texts_builds_count_rows() {
        let table = sample_table();
        assert_eq!(table.len(), 2);

        // "the" is the most frequent term overall, so it is column 0.
        assert_eq!(table.vocab()[0], "the");
        assert_eq!(table.rows()[0][0], 3.0);
        assert_eq!(table.rows()[1][0], 2.0);
    }

    #[test]
    fn test_from_texts_caps_vocabulary() {
        let docs = vec![
            DocInfo::new("One", "A", 1900),
            DocInfo::new("Two", "B", 1901),
        ];
        let texts = ["a a a b b c", "b c d e"];
        let table = CountTable::from_texts(docs, &texts, &Tokenizer::new(), 2).unwrap();

        // "a" and "b" both occur three times; the tie breaks by term order.
        assert_eq!(table.vocab(), &["a".to_string(), "b".to_string()]);
        assert_eq!(table.rows()[0], vec![3.0, 2.0]);
        assert_eq!(table.rows()[1], vec![0.0, 1.0]);
    }

    #[test]
    fn test_round_trip_through_tsv() {
        let table = sample_table();
        let file = NamedTempFile::new().unwrap();
        table.write_tsv(file.path()).unwrap();

        let loaded = CountTable::read_tsv(file.path()).unwrap();
        assert_eq!(loaded.vocab(), table.vocab());
        assert_eq!(loaded.docs(), table.docs());
        assert_eq!(loaded.rows(), table.rows());
    }

    #[test]
    fn test_short_row_is_rejected_with_its_index() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(
            file.path(),
            "title\tauthor\tyear\tcat\tdog\nOk\tA\t1900\t1\t2\nBad\tB\t1901\t3\n",
        )
        .unwrap();

        let err = CountTable::read_tsv(file.path()).unwrap_err();
        match err {
            Error::DataFormat { row, .. } => assert_eq!(row, 1),
            other => panic!("expected DataFormat, got {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_count_is_rejected() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(
            file.path(),
            "title\tauthor\tyear\tcat\nOk\tA\t1900\tmany\n",
        )
        .unwrap();

        let err = CountTable::read_tsv(file.path()).unwrap_err();
        assert!(matches!(err, Error::DataFormat { row: 0, .. }));
    }

    #[test]
    fn test_non_integer_year_is_rejected() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(
            file.path(),
            "title\tauthor\tyear\tcat\nOk\tA\tsometime\t1\n",
        )
        .unwrap();

        let err = CountTable::read_tsv(file.path()).unwrap_err();
        assert!(matches!(err, Error::DataFormat { row: 0, .. }));
    }

    #[test]
    fn test_header_needs_metadata_columns() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "title\tauthor\n").unwrap();

        let err = CountTable::read_tsv(file.path()).unwrap_err();
        assert!(matches!(err, Error::DataFormat { row: 0, .. }));
    }

    #[test]
    fn test_normalized_rows_are_relative_frequencies() {
        let table = sample_table();
        let rows = table.normalized_rows().unwrap();
        for row in &rows {
            let total: f32 = row.iter().sum();
            assert!((total - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_zero_mass_row_cannot_be_normalized() {
        let rows = vec![vec![1.0, 1.0], vec![0.0, 0.0]];
        let err = normalize_rows(&rows).unwrap_err();
        assert!(matches!(err, Error::DataFormat { row: 1, .. }));
    }

    #[test]
    fn test_mismatched_texts_are_rejected() {
        let docs = vec![DocInfo::new("One", "A", 1900)];
        let texts = ["a", "b"];
        let err = CountTable::from_texts(docs, &texts, &Tokenizer::new(), 5).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name: "texts", .. }));
    }
}
