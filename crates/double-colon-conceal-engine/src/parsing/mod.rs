//! # Markdown Parsing
//!
//! A small lossless parser over an `xi_rope::Rope` that knows exactly what
//! field-separator concealment needs: which lines belong to fenced code
//! blocks, and where inline code spans sit inside paragraphs.
//!
//! Headings and list items are treated as paragraphs; their inline content
//! is scanned for code spans like any other text.

pub mod blocks;
pub mod inline;
pub mod rope;

#[cfg(test)]
mod tests;

use xi_rope::Rope;

use blocks::{BlockBuilder, BlockKind, BlockNode, classify_line};
use rope::lines_with_spans;

#[derive(Debug)]
pub struct ParsedDoc {
    pub blocks: Vec<BlockNode>,
}

pub fn parse_document(rope: &Rope) -> ParsedDoc {
    let mut builder = BlockBuilder::new();
    for line in lines_with_spans(rope) {
        builder.push(&classify_line(&line));
    }
    ParsedDoc {
        blocks: builder.finish(),
    }
}

/// Inline parse of a block's content. Code blocks have none.
pub fn parse_inline_for_block(rope: &Rope, block: &BlockNode) -> Vec<inline::InlineNode> {
    if block.kind != BlockKind::Paragraph {
        return vec![];
    }
    let content = block.content_span;
    let text = rope.slice_to_cow(content.start..content.end);
    inline::parse_inline(content.start, &text)
}
