//! Page-unload guard for unsaved annotation edits.

use std::cell::Cell;
use std::rc::Rc;

use inkview_bridge::PluginBridge;
use inkview_dom::Event;

/// Guards against navigating away from a document with unsaved edits.
///
/// The guard decides at dispatch time: a `beforeunload` check prevents the
/// default (and records `preventDefault` toward the plugin) only while edits
/// are outstanding. An edit that is undone before the check leaves no trace.
pub struct UnloadGuard {
    bridge: Rc<PluginBridge>,
    edits: Cell<u64>,
}

impl UnloadGuard {
    /// Create a guard wired to the shared bridge.
    #[must_use]
    pub fn new(bridge: &Rc<PluginBridge>) -> Self {
        Self {
            bridge: Rc::clone(bridge),
            edits: Cell::new(0),
        }
    }

    /// Note one unsaved edit.
    pub fn mark_edited(&self) {
        self.edits.set(self.edits.get() + 1);
    }

    /// Undo the most recent edit. No-op when nothing is outstanding.
    pub fn undo(&self) {
        self.edits.set(self.edits.get().saturating_sub(1));
    }

    /// Discard all outstanding edits (e.g. after a successful save).
    pub fn undo_all(&self) {
        self.edits.set(0);
    }

    /// Whether any edit is outstanding.
    #[must_use]
    pub fn has_unsaved_edits(&self) -> bool {
        self.edits.get() > 0
    }

    /// Handle a `beforeunload` check. Prevents the default action and records
    /// the call only when edits are outstanding.
    pub fn handle_before_unload(&self, event: &Event) {
        if self.has_unsaved_edits() {
            event.prevent_default();
            self.bridge.record_call("preventDefault", vec![]);
        }
    }
}
