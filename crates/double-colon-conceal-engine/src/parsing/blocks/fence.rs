#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceKind {
    Backticks,
    Tildes,
}

impl FenceKind {
    pub fn marker(self) -> char {
        match self {
            FenceKind::Backticks => '`',
            FenceKind::Tildes => '~',
        }
    }

    fn from_marker(c: char) -> Option<Self> {
        match c {
            '`' => Some(FenceKind::Backticks),
            '~' => Some(FenceKind::Tildes),
            _ => None,
        }
    }
}

/// A line that looks like a code fence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FenceSig {
    pub kind: FenceKind,
    /// Length of the marker run.
    pub len: usize,
    /// Something other than whitespace follows the run (an info string).
    pub has_info: bool,
}

impl FenceSig {
    pub const MIN_LEN: usize = 3;

    /// Reads a fence from the content of a line. Leading indentation is
    /// ignored so fences inside list items are found too.
    pub fn parse(text: &str) -> Option<Self> {
        let t = text.trim_end_matches(['\r', '\n']).trim_start();
        let kind = FenceKind::from_marker(t.chars().next()?)?;
        let len = t.chars().take_while(|&c| c == kind.marker()).count();
        if len < Self::MIN_LEN {
            return None;
        }
        let info = &t[len..];
        // ```a`b is inline code, not a fence
        if kind == FenceKind::Backticks && info.contains(kind.marker()) {
            return None;
        }
        Some(Self {
            kind,
            len,
            has_info: !info.trim().is_empty(),
        })
    }

    /// Whether `line` closes a fence opened with `self`: same marker, a run
    /// at least as long, and no info string.
    pub fn is_closed_by(self, line: Option<FenceSig>) -> bool {
        line.is_some_and(|l| l.kind == self.kind && l.len >= self.len && !l.has_info)
    }
}
