use crate::parsing::rope::Span;

/// A piece of inline content, stored as spans into the rope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineNode {
    Text(Span),
    /// Backtick-delimited code; nothing inside is parsed.
    CodeSpan {
        /// Backticks included.
        full: Span,
        /// Between the backticks.
        inner: Span,
    },
}

impl InlineNode {
    pub fn span(&self) -> Span {
        match self {
            InlineNode::Text(span) => *span,
            InlineNode::CodeSpan { full, .. } => *full,
        }
    }
}
