//! # Block Parsing
//!
//! Each line is first classified on its own (`classify`): quote depth, the
//! content after the quote markers, whether it is blank, whether it looks
//! like a fence, heading or list item. The `BlockBuilder` then folds those
//! facts into paragraphs and fenced code blocks. Headings and list items
//! become paragraphs of their own, so inline code never pairs backticks
//! across them.
//!
//! Every line inside a fenced code block, fences included, is code and never
//! carries a field separator. All block nodes store byte spans into the rope.

pub mod builder;
pub mod classify;
pub mod fence;
pub mod leader;
pub mod quote;
pub mod types;

pub use builder::BlockBuilder;
pub use classify::{LineFacts, classify_line};
pub use fence::{FenceKind, FenceSig};
pub use leader::LineLeader;
pub use types::{BlockKind, BlockNode};
