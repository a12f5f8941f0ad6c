//! Byte spans and line lookup over an `xi_rope::Rope`.

pub mod lines;
pub mod span;

pub use lines::{Line, LineRef, LineTable, lines_with_spans};
pub use span::{Span, has_overlap};
