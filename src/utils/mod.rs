//! Shared utility functions.
//!
//! - `format`: text shaping for previews, padded numbers and flattened search fields

mod format;

pub use format::{excerpt, join_lines, pad_start};
