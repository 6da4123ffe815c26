use thiserror::Error;

/// Errors returned by the algorithms and loaders in this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Input slice is empty.
    #[error("empty input")]
    EmptyInput,

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// Requested cluster count is incompatible with the dataset.
    #[error("invalid cluster count: requested {requested}, but dataset has {n_items} items")]
    InvalidClusterCount {
        /// Requested number of clusters.
        requested: usize,
        /// Number of items in the dataset.
        n_items: usize,
    },

    /// Points in a dataset have inconsistent dimensionality.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected dimensionality.
        expected: usize,
        /// Found dimensionality.
        found: usize,
    },

    /// A table row that cannot be interpreted.
    #[error("malformed table row {row}: {message}")]
    DataFormat {
        /// Zero-based data row index.
        row: usize,
        /// Human-readable explanation.
        message: String,
    },

    /// I/O failure while reading or writing a file.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// CSV-layer failure while reading or writing a table.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Other error.
    #[error("{0}")]
    Other(String),
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
