/// A byte range `[start, end)` into the rope.
///
/// All parsed nodes and concealment regions store spans rather than copied
/// text, so slicing the rope with any span reproduces the exact source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {start} after end {end}");
        Self { start, end }
    }

    /// Returns the length in bytes. Uses saturating subtraction for safety.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span is empty (start >= end).
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Boundary-inclusive overlap, see [`has_overlap`].
    #[must_use]
    pub fn touches(self, other: Span) -> bool {
        has_overlap(self.start, self.end, other.start, other.end)
    }
}

/// Whether two ranges overlap, counting shared endpoints as overlap.
///
/// `[0, 5]` and `[5, 10]` overlap; `[0, 4]` and `[5, 10]` do not. A caret
/// sitting at the very end of a line therefore still counts as "on" it.
pub fn has_overlap(first_from: usize, first_to: usize, second_from: usize, second_to: usize) -> bool {
    first_from <= second_to && second_from <= first_to
}
