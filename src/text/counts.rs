//! Term occurrence counting.

use std::collections::HashMap;

/// Term occurrence counts over one or more documents.
///
/// Reads have a defined default: [`count`](TermCounts::count) returns zero
/// for any term that was never added, so lookups never need a missing-key
/// case. Writes only ever go through [`add`](TermCounts::add) and friends.
#[derive(Clone, Debug, Default)]
pub struct TermCounts {
    counts: HashMap<String, u64>,
    total: u64,
}

impl TermCounts {
    /// Create an empty counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `term`.
    pub fn add(&mut self, term: &str) {
        self.add_n(term, 1);
    }

    /// Count `n` occurrences of `term`.
    pub fn add_n(&mut self, term: &str, n: u64) {
        if n == 0 {
            return;
        }
        *self.counts.entry(term.to_string()).or_insert(0) += n;
        self.total += n;
    }

    /// Count every token in `terms`.
    pub fn add_many<I, S>(&mut self, terms: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for term in terms {
            self.add(term.as_ref());
        }
    }

    /// Fold another counter into this one.
    pub fn merge(&mut self, other: &TermCounts) {
        for (term, count) in other.iter() {
            self.add_n(term, count);
        }
    }

    /// Occurrences of `term`; zero if it was never added.
    pub fn count(&self, term: &str) -> u64 {
        self.counts.get(term).copied().unwrap_or(0)
    }

    /// `term`'s share of all occurrences, in `[0, 1]`; zero for an empty
    /// counter.
    pub fn relative(&self, term: &str) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(term) as f64 / self.total as f64
    }

    /// Total number of occurrences across all terms.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct terms.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Whether nothing has been counted yet.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Iterate over `(term, count)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.counts.iter().map(|(term, &count)| (term.as_str(), count))
    }

    /// The `n` most frequent terms with their counts.
    ///
    /// Ordering is deterministic: count descending, then term ascending, so
    /// equal counts always list in the same order.
    pub fn most_common(&self, n: usize) -> Vec<(&str, u64)> {
        let mut entries: Vec<(&str, u64)> = self.iter().collect();
        entries.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries.truncate(n);
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unseen_terms_count_zero() {
        let mut counts = TermCounts::new();
        counts.add("whale");
        assert_eq!(counts.count("whale"), 1);
        assert_eq!(counts.count("ahab"), 0);
        assert_eq!(counts.relative("ahab"), 0.0);
    }

    #[test]
    fn totals_track_every_addition() {
        let mut counts = TermCounts::new();
        counts.add_many(["the", "sea", "the", "ship"]);
        assert_eq!(counts.total(), 4);
        assert_eq!(counts.distinct(), 3);
        assert_eq!(counts.count("the"), 2);
        assert!((counts.relative("the") - 0.5).abs() < 1e-12);
    }

    #[test]
    fn most_common_breaks_ties_by_term() {
        let mut counts = TermCounts::new();
        counts.add_many(["b", "a", "c", "a", "b", "c", "d"]);
        let top = counts.most_common(3);
        assert_eq!(top, vec![("a", 2), ("b", 2), ("c", 2)]);
    }

    #[test]
    fn most_common_caps_at_distinct_terms() {
        let mut counts = TermCounts::new();
        counts.add("one");
        assert_eq!(counts.most_common(10).len(), 1);
    }

    #[test]
    fn merge_sums_counts() {
        let mut a = TermCounts::new();
        a.add_many(["sea", "sea", "sky"]);
        let mut b = TermCounts::new();
        b.add_many(["sea", "land"]);

        a.merge(&b);
        assert_eq!(a.count("sea"), 3);
        assert_eq!(a.count("land"), 1);
        assert_eq!(a.total(), 5);
    }

    #[test]
    fn empty_counter_is_empty() {
        let counts = TermCounts::new();
        assert!(counts.is_empty());
        assert_eq!(counts.total(), 0);
        assert!(counts.most_common(5).is_empty());
    }
}
