//! Viewer toolbar: document title, page count, annotation mode.

use std::rc::Rc;

use serde_json::{Value, json};

use inkview_bridge::PluginBridge;
use inkview_dom::{Element, ElementHandle, Inspect, UpdateScheduler};

/// Toolbar across the top of the viewer.
///
/// The title child's `text` property stays unset until a document title is
/// reflected, so "no title yet" reads as absence rather than an empty string.
/// Toggling annotation mode records the outbound `setAnnotationMode` call
/// immediately; the `annotation-mode` attribute follows on the next settle.
pub struct ViewerToolbar {
    scheduler: Rc<UpdateScheduler>,
    bridge: Rc<PluginBridge>,
    root: ElementHandle,
    title: ElementHandle,
}

impl ViewerToolbar {
    /// Create a toolbar wired to the shared scheduler and bridge.
    #[must_use]
    pub fn new(scheduler: &Rc<UpdateScheduler>, bridge: &Rc<PluginBridge>) -> Self {
        let root = Element::new("viewer-toolbar", "toolbar");
        let title = Element::new("span", "doc-title");
        root.append_child(Rc::clone(&title));
        root.append_child(Element::new("span", "page-count"));
        root.append_child(Element::new("button", "annotate"));
        Self {
            scheduler: Rc::clone(scheduler),
            bridge: Rc::clone(bridge),
            root,
            title,
        }
    }

    /// Root element of the toolbar subtree.
    #[must_use]
    pub fn root(&self) -> ElementHandle {
        Rc::clone(&self.root)
    }

    /// Reflected document title, if any has been applied yet.
    #[must_use]
    pub fn title_text(&self) -> Option<String> {
        match self.title.property("text") {
            Some(Value::String(text)) => Some(text),
            _ => None,
        }
    }

    /// Set the document title. Reflection is deferred.
    pub fn set_doc_title(&self, title: impl Into<String>) {
        let title_el = Rc::clone(&self.title);
        let text = title.into();
        self.scheduler.schedule(move || {
            title_el.set_property("text", json!(text));
        });
    }

    /// Set the page count shown next to the title. Reflection is deferred.
    pub fn set_page_count(&self, count: u32) {
        let root = Rc::clone(&self.root);
        self.scheduler.schedule(move || {
            root.set_attribute("data-page-count", count.to_string());
        });
    }

    /// Toggle annotation mode. Records the outbound call now, reflects the
    /// `annotation-mode` attribute on the next settle.
    pub fn set_annotation_mode(&self, enabled: bool) {
        self.bridge
            .record_call("setAnnotationMode", vec![json!(enabled)]);
        let root = Rc::clone(&self.root);
        self.scheduler.schedule(move || {
            if enabled {
                root.set_attribute("annotation-mode", "");
            } else {
                root.remove_attribute("annotation-mode");
            }
        });
    }
}

impl Inspect for ViewerToolbar {
    fn query_child(&self, id: &str) -> Option<ElementHandle> {
        self.root.descendant_by_id(id)
    }

    fn get_property(&self, name: &str) -> Option<Value> {
        self.root.property(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (Rc<UpdateScheduler>, Rc<PluginBridge>, ViewerToolbar) {
        let scheduler = UpdateScheduler::new();
        let bridge = PluginBridge::new();
        let toolbar = ViewerToolbar::new(&scheduler, &bridge);
        (scheduler, bridge, toolbar)
    }

    #[test]
    fn title_is_absent_until_reflected() {
        let (scheduler, _bridge, toolbar) = fixture();
        assert_eq!(toolbar.title_text(), None);

        toolbar.set_doc_title("quarterly-report.pdf");
        assert_eq!(toolbar.title_text(), None);

        scheduler.drain_batch();
        assert_eq!(toolbar.title_text(), Some("quarterly-report.pdf".into()));
    }

    #[test]
    fn annotation_toggle_records_immediately_and_reflects_later() {
        let (scheduler, bridge, toolbar) = fixture();

        toolbar.set_annotation_mode(true);
        assert_eq!(bridge.call_count("setAnnotationMode"), 1);
        assert!(!toolbar.root().has_attribute("annotation-mode"));

        scheduler.drain_batch();
        assert!(toolbar.root().has_attribute("annotation-mode"));

        toolbar.set_annotation_mode(false);
        scheduler.drain_batch();
        assert!(!toolbar.root().has_attribute("annotation-mode"));
        assert_eq!(bridge.calls_for("setAnnotationMode"), vec![
            vec![json!(true)],
            vec![json!(false)],
        ]);
    }

    #[test]
    fn toolbar_children_are_queryable() {
        let (_scheduler, _bridge, toolbar) = fixture();
        assert!(toolbar.query_child("doc-title").is_some());
        assert!(toolbar.query_child("annotate").is_some());
        assert!(toolbar.query_child("missing").is_none());
    }
}
