use log::debug;

use super::{markdown::render_markdown, tree::RenderedNode};

/// A hook run over every freshly rendered tree.
pub type PostProcessor = Box<dyn Fn(&mut RenderedNode)>;

/// Markdown to rendered tree, followed by every registered post-processor in
/// registration order. Post-processors can't be removed once registered.
#[derive(Default)]
pub struct RenderPipeline {
    post_processors: Vec<PostProcessor>,
}

impl RenderPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_post_processor(&mut self, processor: PostProcessor) {
        self.post_processors.push(processor);
        debug!("{} post-processor(s) registered", self.post_processors.len());
    }

    pub fn post_processor_count(&self) -> usize {
        self.post_processors.len()
    }

    pub fn render(&self, src: &str) -> RenderedNode {
        let mut root = render_markdown(src);
        for processor in &self.post_processors {
            processor(&mut root);
        }
        root
    }
}

impl std::fmt::Debug for RenderPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderPipeline")
            .field("post_processors", &self.post_processors.len())
            .finish()
    }
}
