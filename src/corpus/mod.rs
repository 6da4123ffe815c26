//! Document collections as dense count tables.

mod table;

pub use table::{normalize_rows, CountTable, DocInfo};
