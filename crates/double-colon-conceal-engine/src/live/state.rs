use xi_rope::Rope;

use crate::{
    error::DocumentError,
    parsing::{
        parse_document,
        rope::{Line, LineTable, Span},
    },
};

use super::{CodeLabel, DocumentLabels, EditorView, SyntaxLabels, TextBuffer, ViewUpdate};

/// How the editable view presents markdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditorMode {
    /// Markdown rendered inline around the cursor.
    #[default]
    LivePreview,
    /// Raw markdown source.
    Source,
}

/// A rope-backed editor: document text, selection, viewport and mode.
///
/// Every mutating method reports what it changed as a [`ViewUpdate`], which is
/// exactly what [`super::LiveOverlayController::update`] consumes.
#[derive(Debug, Clone)]
pub struct EditorState {
    rope: Rope,
    lines: LineTable,
    labels: DocumentLabels,
    anchor: usize,
    head: usize,
    /// First visible line and number of lines; `None` shows everything.
    viewport: Option<(usize, usize)>,
    visible: Vec<Span>,
    mode: EditorMode,
}

impl EditorState {
    /// Creates an editor over `text` with the caret at the start.
    pub fn new(text: &str) -> Self {
        let rope = Rope::from(text);
        let lines = LineTable::new(&rope);
        let labels = DocumentLabels::new(&rope, &parse_document(&rope), &lines);
        let mut state = Self {
            rope,
            lines,
            labels,
            anchor: 0,
            head: 0,
            viewport: None,
            visible: Vec::new(),
            mode: EditorMode::default(),
        };
        state.refresh_visible();
        state
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DocumentError> {
        let text = std::str::from_utf8(bytes)?;
        Ok(Self::new(text))
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn len(&self) -> usize {
        self.rope.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len() == 0
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn head(&self) -> usize {
        self.head
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    /// Switches between live preview and source. This is not a document,
    /// viewport or selection change, so it reports no update flags.
    pub fn set_mode(&mut self, mode: EditorMode) -> ViewUpdate {
        self.mode = mode;
        ViewUpdate::none()
    }

    pub fn set_selection(&mut self, anchor: usize, head: usize) -> ViewUpdate {
        let (anchor, head) = (self.lines.snap(anchor), self.lines.snap(head));
        let changed = (anchor, head) != (self.anchor, self.head);
        self.anchor = anchor;
        self.head = head;
        ViewUpdate {
            selection_set: changed,
            ..ViewUpdate::none()
        }
    }

    pub fn set_cursor(&mut self, offset: usize) -> ViewUpdate {
        self.set_selection(offset, offset)
    }

    /// Shows `height` lines starting at 1-based line `first`.
    pub fn set_viewport(&mut self, first: usize, height: usize) -> ViewUpdate {
        let viewport = Some((first.max(1), height.max(1)));
        if viewport == self.viewport {
            return ViewUpdate::none();
        }
        self.viewport = viewport;
        self.refresh_visible()
    }

    /// Replaces the visible ranges directly, e.g. when a host folds regions.
    pub fn set_visible_ranges(&mut self, ranges: Vec<Span>) -> ViewUpdate {
        let changed = ranges != self.visible;
        self.visible = ranges;
        ViewUpdate {
            viewport_changed: changed,
            ..ViewUpdate::none()
        }
    }

    /// Replaces the selection with `text`, leaving the caret after it.
    pub fn insert(&mut self, text: &str) -> ViewUpdate {
        let sel = self.selection();
        self.rope.edit(sel.start..sel.end, text);
        let caret = sel.start + text.len();
        self.anchor = caret;
        self.head = caret;
        self.after_edit()
    }

    /// Deletes the selection, or the character before the caret.
    pub fn delete_backward(&mut self) -> ViewUpdate {
        let mut sel = self.selection();
        if sel.is_empty() {
            match self.step_back(sel.start) {
                Some(prev) => sel.start = prev,
                None => return ViewUpdate::none(),
            }
        }
        self.rope.edit(sel.start..sel.end, "");
        self.anchor = sel.start;
        self.head = sel.start;
        self.after_edit()
    }

    pub fn move_left(&mut self) -> ViewUpdate {
        let target = self.step_back(self.head).unwrap_or(0);
        self.set_cursor(target)
    }

    pub fn move_right(&mut self) -> ViewUpdate {
        let line = self.lines.line_at(self.head);
        let target = if self.head < line.to {
            self.rope.next_codepoint_offset(self.head).unwrap_or(line.to)
        } else if line.number < self.lines.len() {
            self.lines.line(line.number + 1).from
        } else {
            line.to
        };
        self.set_cursor(target)
    }

    pub fn move_up(&mut self) -> ViewUpdate {
        let line = self.lines.line_at(self.head).number;
        if line == 1 {
            return self.set_cursor(0);
        }
        self.move_to_line(line - 1)
    }

    pub fn move_down(&mut self) -> ViewUpdate {
        let line = self.lines.line_at(self.head).number;
        if line == self.lines.len() {
            return self.set_cursor(self.rope.len());
        }
        self.move_to_line(line + 1)
    }

    /// The caret position one step before `offset`. A line terminator,
    /// `\r\n` included, is a single step.
    fn step_back(&self, offset: usize) -> Option<usize> {
        let line = self.lines.line_at(offset);
        if offset == line.from && line.number > 1 {
            return Some(self.lines.line(line.number - 1).to);
        }
        self.rope.prev_codepoint_offset(offset)
    }

    fn move_to_line(&mut self, number: usize) -> ViewUpdate {
        let current = self.lines.line_at(self.head);
        let column = self.head - current.from;
        let target = self.lines.line(number);
        let mut column = column.min(target.text.len());
        while !target.text.is_char_boundary(column) {
            column -= 1;
        }
        let offset = target.from + column;
        self.set_cursor(offset)
    }

    fn after_edit(&mut self) -> ViewUpdate {
        self.lines = LineTable::new(&self.rope);
        self.labels = DocumentLabels::new(&self.rope, &parse_document(&self.rope), &self.lines);
        let viewport = self.refresh_visible();
        ViewUpdate {
            doc_changed: true,
            selection_set: true,
            viewport_changed: viewport.viewport_changed,
        }
    }

    fn refresh_visible(&mut self) -> ViewUpdate {
        let visible = match self.viewport {
            None => vec![Span::new(0, self.rope.len())],
            Some((first, height)) => {
                let first = self.lines.line(first);
                let last = self.lines.line(first.number + height - 1);
                vec![Span::new(first.from, last.to)]
            }
        };
        self.set_visible_ranges(visible)
    }
}

impl TextBuffer for EditorState {
    fn line_at(&self, offset: usize) -> Line {
        self.lines.line_at(offset).clone()
    }

    fn line(&self, number: usize) -> Line {
        self.lines.line(number).clone()
    }

    fn selection(&self) -> Span {
        Span::new(self.anchor.min(self.head), self.anchor.max(self.head))
    }

    fn visible_ranges(&self) -> &[Span] {
        &self.visible
    }
}

impl SyntaxLabels for EditorState {
    fn iterate(&self, range: Span, visit: &mut dyn FnMut(CodeLabel)) {
        self.labels.iterate(range, visit);
    }
}

impl EditorView for EditorState {
    fn is_live_preview(&self) -> bool {
        self.mode == EditorMode::LivePreview
    }
}
