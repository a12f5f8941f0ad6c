/// The blockquote markers at the start of a line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuotePrefix {
    /// Number of `>` markers; 0 outside any quote.
    pub depth: u8,
    /// Bytes taken by the markers and their spacing.
    pub len: usize,
}

impl QuotePrefix {
    pub const MARKER: u8 = b'>';

    /// Reads every leading `>` of `line`. Each marker may be preceded by
    /// spaces and eats one following space.
    pub fn of(line: &str) -> Self {
        let bytes = line.as_bytes();
        let mut prefix = Self::default();

        loop {
            let mut i = prefix.len;
            while bytes.get(i) == Some(&b' ') {
                i += 1;
            }
            if bytes.get(i) != Some(&Self::MARKER) {
                return prefix;
            }
            i += 1;
            if bytes.get(i) == Some(&b' ') {
                i += 1;
            }
            prefix.depth = prefix.depth.saturating_add(1);
            prefix.len = i;
        }
    }
}
