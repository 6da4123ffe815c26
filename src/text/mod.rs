//! Tokenization, term counting, and stoplists.
//!
//! Everything downstream of raw text starts here: [`Tokenizer`] turns a
//! string into tokens, [`TermCounts`] tallies them with a defined
//! zero-for-unseen read, and the stoplist helpers mark the high-frequency
//! terms worth excluding from comparisons.

mod counts;
mod stoplist;
mod tokenize;

pub use counts::TermCounts;
pub use stoplist::{
    document_frequencies, frequency_divergence, frequency_stoplist, DivergenceEntry,
    DivergenceReport,
};
pub use tokenize::{TokenMode, Tokenizer};
