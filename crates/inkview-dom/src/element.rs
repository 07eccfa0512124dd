//! Element tree with attributes, duck-typed properties, and id lookup.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use serde_json::Value;

/// Shared handle to an element node.
pub type ElementHandle = Rc<Element>;

/// A headless element: no layout, no paint, just the observable surface the
/// viewer scenarios assert on.
///
/// Attributes are string-valued and reflect what a serialized tree would
/// show; `attribute` returns `None` for an absent attribute so presence
/// checks stay distinguishable from empty values. Properties are JSON values
/// and cover the duck-typed state components expose (numbers, strings,
/// booleans, records).
#[derive(Debug)]
pub struct Element {
    tag: String,
    id: String,
    attributes: RefCell<BTreeMap<String, String>>,
    properties: RefCell<BTreeMap<String, Value>>,
    children: RefCell<Vec<ElementHandle>>,
}

impl Element {
    /// Create a new element handle.
    #[must_use]
    pub fn new(tag: impl Into<String>, id: impl Into<String>) -> ElementHandle {
        Rc::new(Self {
            tag: tag.into(),
            id: id.into(),
            attributes: RefCell::new(BTreeMap::new()),
            properties: RefCell::new(BTreeMap::new()),
            children: RefCell::new(Vec::new()),
        })
    }

    /// Tag name.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Element id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Set or replace an attribute.
    pub fn set_attribute(&self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.borrow_mut().insert(name.into(), value.into());
    }

    /// Remove an attribute. Removing an absent attribute is a no-op.
    pub fn remove_attribute(&self, name: &str) {
        self.attributes.borrow_mut().remove(name);
    }

    /// Read an attribute; `None` means the attribute is not present.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.borrow().get(name).cloned()
    }

    /// Whether an attribute is present, regardless of value.
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.borrow().contains_key(name)
    }

    /// Set or replace a property.
    pub fn set_property(&self, name: impl Into<String>, value: Value) {
        self.properties.borrow_mut().insert(name.into(), value);
    }

    /// Read a property; `None` means the property was never set.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<Value> {
        self.properties.borrow().get(name).cloned()
    }

    /// Append a child element.
    pub fn append_child(&self, child: ElementHandle) {
        self.children.borrow_mut().push(child);
    }

    /// Remove all children.
    pub fn clear_children(&self) {
        self.children.borrow_mut().clear();
    }

    /// Snapshot of the current children, in document order.
    #[must_use]
    pub fn children(&self) -> Vec<ElementHandle> {
        self.children.borrow().clone()
    }

    /// Number of direct children.
    #[must_use]
    pub fn child_count(&self) -> usize {
        self.children.borrow().len()
    }

    /// Depth-first search for a descendant with the given id.
    #[must_use]
    pub fn descendant_by_id(&self, id: &str) -> Option<ElementHandle> {
        for child in self.children.borrow().iter() {
            if child.id() == id {
                return Some(Rc::clone(child));
            }
            if let Some(found) = child.descendant_by_id(id) {
                return Some(found);
            }
        }
        None
    }
}

/// Capability surface the harness uses to observe a component under test:
/// descendant lookup by loose identifier plus duck-typed property reads.
pub trait Inspect {
    /// Find a descendant element by id.
    fn query_child(&self, id: &str) -> Option<ElementHandle>;

    /// Read a dynamic property of the component.
    fn get_property(&self, name: &str) -> Option<Value>;
}

impl Inspect for Element {
    fn query_child(&self, id: &str) -> Option<ElementHandle> {
        self.descendant_by_id(id)
    }

    fn get_property(&self, name: &str) -> Option<Value> {
        self.property(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_attribute_reads_as_none() {
        let el = Element::new("viewer-toolbar", "toolbar");
        assert_eq!(el.attribute("open"), None);
        el.set_attribute("open", "");
        assert_eq!(el.attribute("open"), Some(String::new()));
        el.remove_attribute("open");
        assert_eq!(el.attribute("open"), None);
        assert!(!el.has_attribute("open"));
    }

    #[test]
    fn descendant_lookup_is_depth_first() {
        let root = Element::new("div", "root");
        let bar = Element::new("viewer-attachment-bar", "attachments");
        let item = Element::new("viewer-attachment", "item-0");
        bar.append_child(Rc::clone(&item));
        root.append_child(Rc::clone(&bar));

        let found = root.descendant_by_id("item-0").expect("nested child");
        assert_eq!(found.tag(), "viewer-attachment");
        assert!(root.descendant_by_id("missing").is_none());
    }

    #[test]
    fn properties_hold_json_values() {
        let el = Element::new("viewer-progress-ring", "progress");
        assert_eq!(el.property("value"), None);
        el.set_property("value", json!(30.0));
        assert_eq!(el.property("value"), Some(json!(30.0)));
    }

    #[test]
    fn clear_children_empties_the_tree() {
        let root = Element::new("div", "root");
        root.append_child(Element::new("span", "a"));
        root.append_child(Element::new("span", "b"));
        assert_eq!(root.child_count(), 2);
        root.clear_children();
        assert_eq!(root.child_count(), 0);
        assert!(root.descendant_by_id("a").is_none());
    }
}
