use crate::parsing::rope::{LineRef, Span};

use super::{fence::FenceSig, leader::LineLeader, quote::QuotePrefix};

/// What can be told about a line without looking at its neighbours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFacts {
    /// The whole line, terminator included.
    pub line: Span,
    pub quote_depth: u8,
    /// The line after its quote markers, terminator excluded.
    pub content: Span,
    /// Nothing but whitespace after the quote markers.
    pub blank: bool,
    pub fence: Option<FenceSig>,
    pub leader: Option<LineLeader>,
}

pub fn classify_line(line: &LineRef) -> LineFacts {
    let body = line.text.trim_end_matches(['\r', '\n']);
    let quote = QuotePrefix::of(body);
    let rest = &body[quote.len..];
    let start = line.span.start;

    LineFacts {
        line: line.span,
        quote_depth: quote.depth,
        content: Span::new(start + quote.len, start + body.len()),
        blank: rest.trim().is_empty(),
        fence: FenceSig::parse(rest),
        leader: LineLeader::of(rest),
    }
}
