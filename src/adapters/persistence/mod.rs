//! File-based persistence: batch comment input and reply result output.

pub mod batch_csv;

pub use batch_csv::{BatchInput, read_comments, write_results};
