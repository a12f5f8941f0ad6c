use log::warn;

use crate::parsing::rope::{Line, Span};

/// Inline widget drawn in place of a concealed `::`.
///
/// Two widgets always compare equal: the glyph never varies within one
/// controller, so a redraw of an equal overlay set is a no-op.
#[derive(Debug, Clone)]
pub struct ConcealWidget {
    replacement: String,
}

impl ConcealWidget {
    pub fn new(replacement: impl Into<String>) -> Self {
        Self {
            replacement: replacement.into(),
        }
    }

    /// The glyph to display; may be empty.
    pub fn text(&self) -> &str {
        &self.replacement
    }

    /// Events on the widget are not swallowed: clicks and keys at its
    /// position still reach the real document offsets underneath.
    pub fn ignore_event(&self) -> bool {
        false
    }
}

impl PartialEq for ConcealWidget {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ConcealWidget {}

/// A display-only replacement of one `::`.
///
/// Replacements are inline (never block-level) and non-inclusive: text typed
/// at either edge is inserted outside the region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Concealment {
    pub span: Span,
    pub widget: ConcealWidget,
}

/// Concealments ordered by ascending start, never overlapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlaySet {
    regions: Vec<Concealment>,
}

impl OverlaySet {
    /// The empty set.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Concealment> {
        self.regions.iter()
    }

    pub fn spans(&self) -> Vec<Span> {
        self.regions.iter().map(|c| c.span).collect()
    }

    /// Text of `line` as displayed with its concealments applied.
    pub fn display_line(&self, line: &Line) -> String {
        let mut out = String::with_capacity(line.text.len());
        let mut cursor = 0;
        let inside = self
            .regions
            .iter()
            .filter(|c| c.span.start >= line.from && c.span.end <= line.to);
        for region in inside {
            let start = region.span.start - line.from;
            let end = region.span.end - line.from;
            out.push_str(&line.text[cursor..start]);
            out.push_str(region.widget.text());
            cursor = end;
        }
        out.push_str(&line.text[cursor..]);
        out
    }
}

/// Collects concealments in order, mirroring a range-set builder: a region
/// starting before the end of the previous one is rejected.
#[derive(Debug, Default)]
pub struct OverlaySetBuilder {
    regions: Vec<Concealment>,
}

impl OverlaySetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a region, returning false if it would break ordering.
    pub fn add(&mut self, span: Span, widget: ConcealWidget) -> bool {
        if let Some(last) = self.regions.last()
            && span.start < last.span.end
        {
            warn!(
                "dropping out-of-order concealment {span:?} after {:?}",
                last.span
            );
            return false;
        }
        self.regions.push(Concealment { span, widget });
        true
    }

    pub fn finish(self) -> OverlaySet {
        OverlaySet {
            regions: self.regions,
        }
    }
}
