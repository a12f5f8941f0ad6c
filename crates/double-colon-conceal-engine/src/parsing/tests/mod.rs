//! Whole-document parsing tests. Every parse is also run through
//! [`invariants::check`].


use pretty_assertions::assert_eq;
use xi_rope::Rope;

use crate::parsing::{
    ParsedDoc,
    blocks::{BlockKind, FenceKind},
    inline::InlineNode,
    parse_document, parse_inline_for_block,
    rope::Span,
};

fn parse(md: &str) -> (Rope, ParsedDoc) {
    let rope = Rope::from(md);
    let doc = parse_document(&rope);
    invariants::check(&rope, &doc.blocks);
    (rope, doc)
}

fn kinds(doc: &ParsedDoc) -> Vec<BlockKind> {
    doc.blocks.iter().map(|b| b.kind.clone()).collect()
}

const BACKTICK_FENCE: BlockKind = BlockKind::FencedCode {
    kind: FenceKind::Backticks,
};

#[test]
fn paragraph_then_fence() {
    let (_, doc) = parse("Status:: Done\n\n```\na:: b\n```\n");
    assert_eq!(kinds(&doc), vec![BlockKind::Paragraph, BACKTICK_FENCE]);
    assert_eq!(doc.blocks[1].span, Span::new(15, 29));
}

#[test]
fn fence_interrupts_paragraph() {
    let (_, doc) = parse("intro\n~~~\nx:: y\n~~~\nafter:: z\n");
    assert_eq!(
        kinds(&doc),
        vec![
            BlockKind::Paragraph,
            BlockKind::FencedCode {
                kind: FenceKind::Tildes
            },
            BlockKind::Paragraph,
        ]
    );
}

#[test]
fn unterminated_fence_runs_to_end() {
    let (rope, doc) = parse("```\nKey:: value\nmore");
    assert_eq!(kinds(&doc), vec![BACKTICK_FENCE]);
    assert_eq!(doc.blocks[0].span.end, rope.len());
}

#[test]
fn shorter_fence_does_not_close_longer_one() {
    let (_, doc) = parse("````\n```\nA:: b\n````\nC:: d\n");
    assert_eq!(kinds(&doc), vec![BACKTICK_FENCE, BlockKind::Paragraph]);
}

#[test]
fn quoted_paragraph_content_skips_marker() {
    let (_, doc) = parse("> Quote:: yes\n");
    assert_eq!(doc.blocks.len(), 1);
    assert_eq!(doc.blocks[0].quote_depth, 1);
    assert_eq!(doc.blocks[0].content_span.start, 2);
}

#[test]
fn fence_inside_quote_ends_with_quote() {
    let (_, doc) = parse("> ```\n> a:: b\nc:: d\n");
    assert_eq!(kinds(&doc), vec![BACKTICK_FENCE, BlockKind::Paragraph]);
    assert_eq!(doc.blocks[0].span, Span::new(0, 14));
    assert_eq!(doc.blocks[1].quote_depth, 0);
}

#[test]
fn quote_depth_change_splits_paragraph() {
    let (_, doc) = parse("a:: 1\n> b:: 2\n");
    assert_eq!(doc.blocks.len(), 2);
    assert_eq!(doc.blocks[1].span, Span::new(6, 14));
}

#[test]
fn list_items_are_separate_blocks() {
    let (_, doc) = parse("- one\n- two:: x\n  lazy\n3. three\n");
    let spans: Vec<_> = doc.blocks.iter().map(|b| b.span).collect();
    assert_eq!(
        spans,
        vec![Span::new(0, 6), Span::new(6, 23), Span::new(23, 32)]
    );
}

#[test]
fn heading_is_a_single_line_block() {
    let (_, doc) = parse("# Title\nKey:: v\nmore\n");
    let spans: Vec<_> = doc.blocks.iter().map(|b| b.span).collect();
    assert_eq!(spans, vec![Span::new(0, 8), Span::new(8, 21)]);
}

#[test]
fn code_span_does_not_cross_list_items() {
    let (rope, doc) = parse("- use ` for code\n- Status:: `done`\n");
    let code: Vec<_> = doc
        .blocks
        .iter()
        .flat_map(|b| parse_inline_for_block(&rope, b))
        .filter_map(|n| match n {
            InlineNode::CodeSpan { full, .. } => Some(full),
            InlineNode::Text(_) => None,
        })
        .collect();
    assert_eq!(code, vec![Span::new(28, 34)]);
}

#[test]
fn code_span_inside_paragraph() {
    let (rope, doc) = parse("first\nsee `a::b` here\n");
    let code: Vec<_> = parse_inline_for_block(&rope, &doc.blocks[0])
        .into_iter()
        .filter_map(|n| match n {
            InlineNode::CodeSpan { full, .. } => Some(full),
            InlineNode::Text(_) => None,
        })
        .collect();
    assert_eq!(code, vec![Span::new(10, 16)]);
}

#[test]
fn fences_have_no_inline_content() {
    let (rope, doc) = parse("```\n`x`\n```\n");
    assert!(parse_inline_for_block(&rope, &doc.blocks[0]).is_empty());
}

#[test]
fn blank_documents_have_no_blocks() {
    assert!(parse("").1.blocks.is_empty());
    assert!(parse("\n\n  \n").1.blocks.is_empty());
}
