pub mod error;
pub mod field;
pub mod live;
pub mod parsing;
pub mod plugin;
pub mod rendered;

// Re-export key types for easier usage
pub use error::DocumentError;
pub use field::*;
pub use live::{
    EditorExtension, EditorMode, EditorState, EditorView, LiveOverlayController, OverlaySet,
    ViewUpdate, scan_concealments,
};
pub use parsing::rope::{Span, has_overlap};
pub use plugin::{ConcealPlugin, Workspace};
pub use rendered::{RenderPipeline, RenderedNode, RewriterGuard, conceal_rendered, render_markdown};
