//! Attachment bar: embedded-file list with save activation.

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use inkview_bridge::PluginBridge;
use inkview_dom::{Element, ElementHandle, Event, EventTarget, Inspect, UpdateScheduler};

/// One embedded file shown in the bar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    /// File name shown to the user.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
}

/// Horizontal bar listing a document's embedded attachments.
///
/// `set_attachments` rebuilds the child list in one deferred task; activating
/// an item records `saveAttachment` toward the plugin and emits a
/// `save-requested` event with the item's index and name.
pub struct AttachmentBar {
    scheduler: Rc<UpdateScheduler>,
    bridge: Rc<PluginBridge>,
    root: ElementHandle,
    events: Rc<EventTarget>,
}

impl AttachmentBar {
    /// Create an attachment bar wired to the shared scheduler and bridge.
    #[must_use]
    pub fn new(scheduler: &Rc<UpdateScheduler>, bridge: &Rc<PluginBridge>) -> Self {
        Self {
            scheduler: Rc::clone(scheduler),
            bridge: Rc::clone(bridge),
            root: Element::new("viewer-attachment-bar", "attachments"),
            events: Rc::new(EventTarget::new()),
        }
    }

    /// Root element of the bar's subtree.
    #[must_use]
    pub fn root(&self) -> ElementHandle {
        Rc::clone(&self.root)
    }

    /// Event surface (`save-requested`).
    #[must_use]
    pub fn events(&self) -> Rc<EventTarget> {
        Rc::clone(&self.events)
    }

    /// Replace the attachment list. The child rebuild is deferred.
    pub fn set_attachments(&self, attachments: Vec<Attachment>) {
        let root = Rc::clone(&self.root);
        self.scheduler.schedule(move || {
            root.clear_children();
            for (index, attachment) in attachments.iter().enumerate() {
                let item = Element::new("viewer-attachment", format!("item-{index}"));
                item.set_attribute("name", &attachment.name);
                item.set_property("size", json!(attachment.size));
                root.append_child(item);
            }
        });
    }

    /// Simulate the user activating the item at `index`.
    ///
    /// Returns `false` (and does nothing) when no reflected item exists at
    /// that index yet. Otherwise records the outbound `saveAttachment` call
    /// and emits `save-requested` synchronously.
    pub fn activate(&self, index: usize) -> bool {
        let Some(item) = self.root.descendant_by_id(&format!("item-{index}")) else {
            return false;
        };
        let name = item.attribute("name").unwrap_or_default();
        self.bridge.record_call("saveAttachment", vec![json!(index)]);
        self.events.dispatch(&Event::new(
            "save-requested",
            json!({ "index": index, "name": name }),
        ));
        true
    }
}

impl Inspect for AttachmentBar {
    fn query_child(&self, id: &str) -> Option<ElementHandle> {
        self.root.descendant_by_id(id)
    }

    fn get_property(&self, name: &str) -> Option<Value> {
        self.root.property(name)
    }
}
