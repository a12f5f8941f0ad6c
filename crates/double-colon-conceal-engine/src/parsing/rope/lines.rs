use xi_rope::Rope;

use super::span::Span;

/// A reference to a single line in the rope with its byte span.
#[derive(Debug, Clone)]
pub struct LineRef {
    /// Byte span of this line in the rope (includes newline if present).
    pub span: Span,
    /// The line text as a string, newline included.
    pub text: String,
}

/// Returns an iterator over lines with their byte spans.
///
/// Uses `lines_raw` to preserve newline characters, which is important for
/// accurate span tracking during block parsing.
pub fn lines_with_spans(rope: &Rope) -> impl Iterator<Item = LineRef> + '_ {
    let mut offset = 0usize;
    rope.lines_raw(..).map(move |line| {
        let start = offset;
        let len = line.len();
        offset += len;
        LineRef {
            span: Span { start, end: offset },
            text: line.into_owned(),
        }
    })
}

/// A visual line of the document: 1-based number, content bounds without the
/// line terminator, and its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub number: usize,
    pub from: usize,
    pub to: usize,
    pub text: String,
}

impl Line {
    pub fn span(&self) -> Span {
        Span {
            start: self.from,
            end: self.to,
        }
    }
}

/// Line lookup by number or offset over a rope.
///
/// Mirrors how editors number lines: a document ending in a newline (and the
/// empty document) has a final empty line, so every offset `0..=len` maps to
/// exactly one line.
#[derive(Debug, Clone)]
pub struct LineTable {
    lines: Vec<Line>,
}

impl LineTable {
    pub fn new(rope: &Rope) -> Self {
        let mut lines = Vec::new();
        let mut ends_open = true;

        for (idx, lr) in lines_with_spans(rope).enumerate() {
            let text = lr.text.trim_end_matches(['\r', '\n']).to_string();
            ends_open = !lr.text.ends_with('\n');
            lines.push(Line {
                number: idx + 1,
                from: lr.span.start,
                to: lr.span.start + text.len(),
                text,
            });
        }

        if !ends_open || lines.is_empty() {
            let len = rope.len();
            lines.push(Line {
                number: lines.len() + 1,
                from: len,
                to: len,
                text: String::new(),
            });
        }

        Self { lines }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line by 1-based number, clamped into the document.
    pub fn line(&self, number: usize) -> &Line {
        let idx = number.clamp(1, self.lines.len()) - 1;
        &self.lines[idx]
    }

    /// The line containing `offset`; offsets past the end land on the last line.
    pub fn line_at(&self, offset: usize) -> &Line {
        let idx = self
            .lines
            .partition_point(|l| l.from <= offset)
            .saturating_sub(1);
        &self.lines[idx]
    }

    /// Moves an offset that falls inside a line terminator back to the end
    /// of that line's text. Offsets past the document end on its last line.
    pub fn snap(&self, offset: usize) -> usize {
        offset.min(self.line_at(offset).to)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter()
    }
}
