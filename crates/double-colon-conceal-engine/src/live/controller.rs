use std::ops::BitOr;

use log::debug;

use super::{EditorView, OverlaySet, scan_concealments};

/// What a view update changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewUpdate {
    pub doc_changed: bool,
    pub viewport_changed: bool,
    pub selection_set: bool,
}

impl ViewUpdate {
    pub fn none() -> Self {
        Self::default()
    }

    /// Whether this update can change which separators are concealed.
    pub fn needs_rescan(&self) -> bool {
        self.doc_changed || self.viewport_changed || self.selection_set
    }
}

impl BitOr for ViewUpdate {
    type Output = ViewUpdate;

    fn bitor(self, rhs: Self) -> Self {
        Self {
            doc_changed: self.doc_changed || rhs.doc_changed,
            viewport_changed: self.viewport_changed || rhs.viewport_changed,
            selection_set: self.selection_set || rhs.selection_set,
        }
    }
}

/// Keeps the concealment overlay of one editor view current.
///
/// Reconfiguring the glyph replaces the whole controller, so the replacement
/// is fixed for its lifetime.
#[derive(Debug)]
pub struct LiveOverlayController {
    replacement: String,
    decorations: OverlaySet,
}

impl LiveOverlayController {
    /// Attaches to `view`, scanning it immediately.
    pub fn new<V: EditorView + ?Sized>(view: &V, replacement: impl Into<String>) -> Self {
        let replacement = replacement.into();
        let decorations = scan_concealments(view, view, &replacement);
        Self {
            replacement,
            decorations,
        }
    }

    /// Reacts to a view update.
    ///
    /// Outside live preview every region is dropped. Otherwise the overlay is
    /// recomputed for document, viewport and selection changes and kept as is
    /// for anything else.
    pub fn update<V: EditorView + ?Sized>(&mut self, view: &V, update: ViewUpdate) {
        if !view.is_live_preview() {
            if !self.decorations.is_empty() {
                debug!("source mode: clearing {} concealment(s)", self.decorations.len());
            }
            self.decorations = OverlaySet::none();
            return;
        }

        if update.needs_rescan() {
            self.decorations = scan_concealments(view, view, &self.replacement);
        }
    }

    pub fn decorations(&self) -> &OverlaySet {
        &self.decorations
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }
}

/// Factory for overlay controllers with a fixed glyph.
///
/// This is what the editor registers; each view it opens gets its own
/// controller through [`EditorExtension::attach`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorExtension {
    replacement: String,
}

impl EditorExtension {
    pub fn new(replacement: impl Into<String>) -> Self {
        Self {
            replacement: replacement.into(),
        }
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    pub fn attach<V: EditorView + ?Sized>(&self, view: &V) -> LiveOverlayController {
        LiveOverlayController::new(view, self.replacement.clone())
    }
}
