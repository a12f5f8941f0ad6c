//! # Live Surface
//!
//! Concealment for the editable view. Nothing here touches document text:
//! the scanner turns the visible lines of a document into an [`OverlaySet`]
//! of two-byte replacement regions, and the controller keeps that set current
//! as the document, viewport and selection change.
//!
//! ## Modules
//!
//! - **`labels`**: `DocumentLabels`, the code-span / fenced-code labeling service
//! - **`state`**: `EditorState`, a rope-backed editor implementing [`EditorView`]
//! - **`overlay`**: `ConcealWidget`, `Concealment`, `OverlaySet`
//! - **`scanner`**: `scan_concealments()`, the pure region computation
//! - **`controller`**: `LiveOverlayController` and `EditorExtension`
//!
//! ## Host Contract
//!
//! A host editor plugs in by implementing [`TextBuffer`] (lines, selection,
//! visible ranges) and [`SyntaxLabels`] (which spans are code), plus the
//! live-preview flag of [`EditorView`].

pub mod controller;
pub mod labels;
pub mod overlay;
pub mod scanner;
pub mod state;

pub use controller::{EditorExtension, LiveOverlayController, ViewUpdate};
pub use labels::DocumentLabels;
pub use overlay::{ConcealWidget, Concealment, OverlaySet, OverlaySetBuilder};
pub use scanner::scan_concealments;
pub use state::{EditorMode, EditorState};

use crate::parsing::rope::{Line, Span};

/// Read access to the editable document as the view currently shows it.
pub trait TextBuffer {
    /// The line containing `offset`.
    fn line_at(&self, offset: usize) -> Line;
    /// The line with 1-based `number`.
    fn line(&self, number: usize) -> Line;
    /// The main selection; a caret is an empty span.
    fn selection(&self) -> Span;
    /// Ranges currently materialized by the view, ordered and non-overlapping.
    fn visible_ranges(&self) -> &[Span];
}

/// A syntax node that makes a `::` code rather than a field separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeLabel {
    /// An inline code span, backticks included.
    InlineCode(Span),
    /// One line of a fenced code block, fences included.
    FencedCodeLine(Span),
}

impl CodeLabel {
    pub fn span(&self) -> Span {
        match self {
            CodeLabel::InlineCode(span) | CodeLabel::FencedCodeLine(span) => *span,
        }
    }
}

/// Syntax-tree labeling service.
pub trait SyntaxLabels {
    /// Visits every code node touching `range`, in document order.
    fn iterate(&self, range: Span, visit: &mut dyn FnMut(CodeLabel));
}

/// An editor view the controller can attach to.
pub trait EditorView: TextBuffer + SyntaxLabels {
    /// Whether the view renders markdown inline (live preview) rather than
    /// showing raw source. Concealment only applies in live preview.
    fn is_live_preview(&self) -> bool;
}
