use crate::parsing::rope::Span;

use super::fence::FenceKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    /// Anything that isn't code: paragraphs, and also headings and list
    /// items, whose inline content is scanned the same way.
    Paragraph,
    FencedCode { kind: FenceKind },
}

impl BlockKind {
    /// Whether every line of the block is code.
    pub fn is_code(&self) -> bool {
        matches!(self, BlockKind::FencedCode { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockNode {
    pub kind: BlockKind,
    /// Blockquote depth of the block's first line.
    pub quote_depth: u8,
    /// The block's lines, fences and quote markers included.
    pub span: Span,
    /// Where inline parsing starts: after the first line's quote markers.
    pub content_span: Span,
}
