//! The rendered (reading) surface.
//!
//! Markdown is rendered into a small element tree, then post-processors
//! rewrite it in place. Concealment here is destructive: the `::` in the
//! rendered text is replaced, and the tree is thrown away on the next render.

pub mod guard;
pub mod markdown;
pub mod pipeline;
pub mod rewriter;
pub mod tree;

pub use guard::{RewriterGuard, RewriterTicket, conceal_post_processor};
pub use markdown::{LIST_BULLET_CLASS, render_markdown};
pub use pipeline::{PostProcessor, RenderPipeline};
pub use rewriter::{conceal_block, conceal_rendered};
pub use tree::{Element, RenderedNode, Tag};
