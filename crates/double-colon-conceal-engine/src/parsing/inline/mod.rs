//! # Inline Parsing
//!
//! Inline parsing over the content span of a paragraph. Only code spans are
//! recognised; everything else is text. A `::` inside a code span is never a
//! field separator, so code spans are reported with their full,
//! backtick-inclusive spans.

pub mod parser;
pub mod types;

pub use parser::parse_inline;
pub use types::InlineNode;
