use crate::parsing::rope::Span;

use super::types::InlineNode;

const TICK: u8 = b'`';

fn tick_run(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|&&b| b == TICK).count()
}

/// Index of the next backtick run in `bytes[from..]` exactly `len` long.
fn closing_run(bytes: &[u8], from: usize, len: usize) -> Option<usize> {
    let mut i = from;
    while i < bytes.len() {
        if bytes[i] != TICK {
            i += 1;
            continue;
        }
        let run = tick_run(&bytes[i..]);
        if run == len {
            return Some(i);
        }
        i += run;
    }
    None
}

/// Splits `s` into text and code spans.
///
/// `base` is the rope offset of `s`, so returned spans are absolute. A code
/// span opens with a run of backticks and closes at the next run of the same
/// length; an opener without a closer is plain text, all of it, so a shorter
/// run inside it can't start a span either.
pub fn parse_inline(base: usize, s: &str) -> Vec<InlineNode> {
    let bytes = s.as_bytes();
    let mut out = Vec::new();
    let mut text_start = 0;
    let mut i = 0;

    let push_text = |out: &mut Vec<InlineNode>, from: usize, to: usize| {
        if to > from {
            out.push(InlineNode::Text(Span::new(base + from, base + to)));
        }
    };

    while i < bytes.len() {
        if bytes[i] != TICK {
            i += 1;
            continue;
        }
        let open = tick_run(&bytes[i..]);
        match closing_run(bytes, i + open, open) {
            Some(close) => {
                push_text(&mut out, text_start, i);
                out.push(InlineNode::CodeSpan {
                    full: Span::new(base + i, base + close + open),
                    inner: Span::new(base + i + open, base + close),
                });
                i = close + open;
                text_start = i;
            }
            None => i += open,
        }
    }

    push_text(&mut out, text_start, bytes.len());
    out
}
