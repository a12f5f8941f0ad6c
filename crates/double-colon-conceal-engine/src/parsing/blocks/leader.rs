/// A marker that starts a new block on its own line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineLeader {
    /// `#` to `######` then a space or nothing. Always a single line.
    Heading,
    /// `-`, `*`, `+` or `1.` / `1)` then a space or nothing.
    ListItem,
}

impl LineLeader {
    pub const MAX_HEADING_LEVEL: usize = 6;
    pub const MAX_ORDINAL_DIGITS: usize = 9;

    /// Reads the leader of `rest`, the line after its quote markers.
    pub fn of(rest: &str) -> Option<Self> {
        let text = rest.trim_start_matches([' ', '\t']);
        let bytes = text.as_bytes();
        let ends_marker = |i: usize| matches!(bytes.get(i), None | Some(b' ' | b'\t'));

        let hashes = bytes.iter().take_while(|&&b| b == b'#').count();
        if hashes > 0 {
            return (hashes <= Self::MAX_HEADING_LEVEL && ends_marker(hashes))
                .then_some(LineLeader::Heading);
        }

        if matches!(bytes.first(), Some(b'-' | b'*' | b'+')) && ends_marker(1) {
            return Some(LineLeader::ListItem);
        }

        let digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
        if (1..=Self::MAX_ORDINAL_DIGITS).contains(&digits)
            && matches!(bytes.get(digits), Some(b'.' | b')'))
            && ends_marker(digits + 1)
        {
            return Some(LineLeader::ListItem);
        }
        None
    }
}
