//! Dropdown menu with deferred open/close reflection.

use std::rc::Rc;

use serde_json::{Value, json};

use inkview_dom::{Element, ElementHandle, Event, EventTarget, Inspect, UpdateScheduler};

/// Toolbar dropdown (e.g. the downloads menu).
///
/// The `open` attribute is present while the menu is open and absent when
/// closed; scenarios check closed state via attribute absence, not an empty
/// value. Selecting an item sets the `selected` property, closes the menu,
/// and emits `change` — all within the same deferred task so the three are
/// never observed half-applied.
pub struct DropdownMenu {
    scheduler: Rc<UpdateScheduler>,
    root: ElementHandle,
    events: Rc<EventTarget>,
}

impl DropdownMenu {
    /// Create a dropdown wired to the shared scheduler.
    #[must_use]
    pub fn new(scheduler: &Rc<UpdateScheduler>, id: impl Into<String>) -> Self {
        Self {
            scheduler: Rc::clone(scheduler),
            root: Element::new("viewer-dropdown", id),
            events: Rc::new(EventTarget::new()),
        }
    }

    /// Root element of the dropdown subtree.
    #[must_use]
    pub fn root(&self) -> ElementHandle {
        Rc::clone(&self.root)
    }

    /// Event surface (`change`).
    #[must_use]
    pub fn events(&self) -> Rc<EventTarget> {
        Rc::clone(&self.events)
    }

    /// Open the menu. Reflection is deferred.
    pub fn open(&self) {
        let root = Rc::clone(&self.root);
        self.scheduler.schedule(move || {
            root.set_attribute("open", "");
        });
    }

    /// Close the menu without selecting. Reflection is deferred.
    pub fn close(&self) {
        let root = Rc::clone(&self.root);
        self.scheduler.schedule(move || {
            root.remove_attribute("open");
        });
    }

    /// Select an item: sets `selected`, closes the menu, emits `change`.
    pub fn select(&self, item: impl Into<String>) {
        let root = Rc::clone(&self.root);
        let events = Rc::clone(&self.events);
        let item = item.into();
        self.scheduler.schedule(move || {
            root.set_property("selected", json!(item.clone()));
            root.remove_attribute("open");
            events.dispatch(&Event::new("change", json!({ "item": item })));
        });
    }
}

impl Inspect for DropdownMenu {
    fn query_child(&self, id: &str) -> Option<ElementHandle> {
        self.root.descendant_by_id(id)
    }

    fn get_property(&self, name: &str) -> Option<Value> {
        self.root.property(name)
    }
}
