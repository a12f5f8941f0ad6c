use xi_rope::Rope;

use crate::parsing::{
    ParsedDoc,
    inline::InlineNode,
    parse_inline_for_block,
    rope::{LineTable, Span},
};

use super::{CodeLabel, SyntaxLabels};

/// Code labels of a parsed document, in document order.
///
/// Built once per document version; scans only filter it by range.
#[derive(Debug, Clone, Default)]
pub struct DocumentLabels {
    labels: Vec<CodeLabel>,
}

impl DocumentLabels {
    pub fn new(rope: &Rope, doc: &ParsedDoc, lines: &LineTable) -> Self {
        let mut labels = Vec::new();

        for block in &doc.blocks {
            if block.kind.is_code() {
                labels.extend(
                    lines
                        .iter()
                        .filter(|l| l.from >= block.span.start && l.from < block.span.end)
                        .map(|l| CodeLabel::FencedCodeLine(l.span())),
                );
                continue;
            }
            labels.extend(
                parse_inline_for_block(rope, block)
                    .into_iter()
                    .filter_map(|node| match node {
                        InlineNode::CodeSpan { full, .. } => Some(CodeLabel::InlineCode(full)),
                        InlineNode::Text(_) => None,
                    }),
            );
        }

        Self { labels }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl SyntaxLabels for DocumentLabels {
    fn iterate(&self, range: Span, visit: &mut dyn FnMut(CodeLabel)) {
        self.labels
            .iter()
            .filter(|label| label.span().touches(range))
            .for_each(|label| visit(*label));
    }
}
