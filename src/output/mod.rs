//! Output writers for trace data.

pub mod json;

// Re-export main functions
pub use json::{read_trace, write_trace};
