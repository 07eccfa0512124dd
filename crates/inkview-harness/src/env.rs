//! Shared viewer environment for one harness run.

use std::rc::Rc;

use inkview_bridge::PluginBridge;
use inkview_dom::{Element, ElementHandle, UpdateScheduler};

/// The mutable state one run shares across its cases: the update scheduler,
/// the plugin bridge, and the document root the components mount under.
///
/// The harness gives no automatic isolation beyond per-case failure
/// containment; scenarios that mount elements under the root are expected to
/// call [`ViewerEnv::reset_document`] before they start. Discarding the whole
/// environment (a fresh env per suite) is the only way to clear the bridge's
/// call log.
pub struct ViewerEnv {
    /// Deferred-update queue the runner drains between polls.
    pub scheduler: Rc<UpdateScheduler>,
    /// Mock plugin transport.
    pub bridge: Rc<PluginBridge>,
    /// Document root the components mount under.
    pub root: ElementHandle,
}

impl ViewerEnv {
    /// Create a fresh environment.
    #[must_use]
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            scheduler: UpdateScheduler::new(),
            bridge: PluginBridge::new(),
            root: Element::new("viewer-shell", "viewer"),
        })
    }

    /// Clear the document root. Queued updates are left to the runner's
    /// drain loop; recorded calls survive until the env is discarded.
    pub fn reset_document(&self) {
        self.root.clear_children();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_clears_mounted_elements_only() {
        let env = ViewerEnv::new();
        env.root.append_child(Element::new("viewer-toolbar", "toolbar"));
        env.bridge.record_call("save", vec![]);

        env.reset_document();
        assert_eq!(env.root.child_count(), 0);
        assert_eq!(env.bridge.call_count("save"), 1);
    }
}
