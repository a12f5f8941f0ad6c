use std::{cell::Cell, rc::Rc};

use log::trace;

use super::{pipeline::PostProcessor, rewriter::conceal_rendered};

/// Generation counter shared by every rewriter registered through it.
///
/// The pipeline has no way to unregister a post-processor, so reconfiguring
/// registers another one. Each registration takes a ticket and only the
/// holder of the newest ticket does any work.
#[derive(Debug, Clone, Default)]
pub struct RewriterGuard {
    latest: Rc<Cell<u64>>,
}

impl RewriterGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new generation; every earlier ticket goes stale.
    pub fn issue(&self) -> RewriterTicket {
        let id = self.latest.get() + 1;
        self.latest.set(id);
        RewriterTicket {
            id,
            latest: Rc::clone(&self.latest),
        }
    }

    /// Makes every issued ticket stale without issuing a new one.
    pub fn revoke_all(&self) {
        self.latest.set(self.latest.get() + 1);
    }

    pub fn generation(&self) -> u64 {
        self.latest.get()
    }
}

#[derive(Debug, Clone)]
pub struct RewriterTicket {
    id: u64,
    latest: Rc<Cell<u64>>,
}

impl RewriterTicket {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_current(&self) -> bool {
        self.latest.get() == self.id
    }
}

/// Post-processor that conceals rendered fields while `ticket` is current.
pub fn conceal_post_processor(replacement: impl Into<String>, ticket: RewriterTicket) -> PostProcessor {
    let replacement = replacement.into();
    Box::new(move |root| {
        if !ticket.is_current() {
            trace!("skipping stale rewriter #{}", ticket.id());
            return;
        }
        conceal_rendered(root, &replacement);
    })
}
