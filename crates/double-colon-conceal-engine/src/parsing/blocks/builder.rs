use crate::parsing::rope::Span;

use super::{
    classify::LineFacts,
    fence::FenceSig,
    leader::LineLeader,
    types::{BlockKind, BlockNode},
};

/// The block still accepting lines.
#[derive(Debug, Clone, Copy)]
enum Open {
    Nothing,
    Paragraph {
        depth: u8,
        start: usize,
        content_start: usize,
        end: usize,
    },
    Fence {
        depth: u8,
        sig: FenceSig,
        start: usize,
        end: usize,
    },
}

/// Folds classified lines into paragraphs and fenced code blocks.
///
/// A fence runs until a matching closer, until the blockquote holding it
/// ends, or to the end of the document. Paragraphs end at blank lines, at
/// fences, where the quote depth changes, and before a heading or list item.
/// A heading is a paragraph of exactly one line.
#[derive(Debug)]
pub struct BlockBuilder {
    open: Open,
    blocks: Vec<BlockNode>,
}

impl BlockBuilder {
    pub fn new() -> Self {
        Self {
            open: Open::Nothing,
            blocks: Vec::new(),
        }
    }

    pub fn push(&mut self, line: &LineFacts) {
        if let Open::Fence {
            depth, sig, start, ..
        } = self.open
        {
            if line.quote_depth >= depth {
                self.open = Open::Fence {
                    depth,
                    sig,
                    start,
                    end: line.line.end,
                };
                if sig.is_closed_by(line.fence) {
                    self.close();
                }
                return;
            }
            self.close();
        }

        if line.blank {
            self.close();
            return;
        }

        if let Some(sig) = line.fence {
            self.close();
            self.open = Open::Fence {
                depth: line.quote_depth,
                sig,
                start: line.line.start,
                end: line.line.end,
            };
            return;
        }

        if let Some(leader) = line.leader {
            self.close();
            self.open = Open::Paragraph {
                depth: line.quote_depth,
                start: line.line.start,
                content_start: line.content.start,
                end: line.line.end,
            };
            if leader == LineLeader::Heading {
                self.close();
            }
            return;
        }

        self.open = match self.open {
            Open::Paragraph {
                depth,
                start,
                content_start,
                ..
            } if depth == line.quote_depth => Open::Paragraph {
                depth,
                start,
                content_start,
                end: line.line.end,
            },
            _ => {
                self.close();
                Open::Paragraph {
                    depth: line.quote_depth,
                    start: line.line.start,
                    content_start: line.content.start,
                    end: line.line.end,
                }
            }
        };
    }

    pub fn finish(mut self) -> Vec<BlockNode> {
        self.close();
        self.blocks
    }

    fn close(&mut self) {
        let node = match std::mem::replace(&mut self.open, Open::Nothing) {
            Open::Nothing => return,
            Open::Paragraph {
                depth,
                start,
                content_start,
                end,
            } => BlockNode {
                kind: BlockKind::Paragraph,
                quote_depth: depth,
                span: Span::new(start, end),
                content_span: Span::new(content_start, end),
            },
            Open::Fence {
                depth,
                sig,
                start,
                end,
            } => BlockNode {
                kind: BlockKind::FencedCode { kind: sig.kind },
                quote_depth: depth,
                span: Span::new(start, end),
                content_span: Span::new(start, end),
            },
        };
        self.blocks.push(node);
    }
}

impl Default for BlockBuilder {
    fn default() -> Self {
        Self::new()
    }
}
