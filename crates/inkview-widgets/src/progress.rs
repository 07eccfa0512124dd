//! Load-progress ring.

use std::cell::Cell;
use std::rc::Rc;

use serde_json::{Value, json};

use inkview_dom::{Element, ElementHandle, Event, EventTarget, Inspect, UpdateScheduler};

/// Circular load-progress indicator.
///
/// `set_value` batches the reflection: the `value` property, the
/// `aria-valuenow` attribute, and the derived `display` property (`30` →
/// `"30%"`) all change in the same deferred task, so a settled observer never
/// sees them disagree. Reaching 100 sets the `complete` attribute and emits
/// `load-complete` exactly once.
pub struct ProgressRing {
    scheduler: Rc<UpdateScheduler>,
    root: ElementHandle,
    events: Rc<EventTarget>,
    completed: Rc<Cell<bool>>,
}

impl ProgressRing {
    /// Create a ring wired to the shared scheduler.
    #[must_use]
    pub fn new(scheduler: &Rc<UpdateScheduler>) -> Self {
        Self {
            scheduler: Rc::clone(scheduler),
            root: Element::new("viewer-progress-ring", "progress"),
            events: Rc::new(EventTarget::new()),
            completed: Rc::new(Cell::new(false)),
        }
    }

    /// Root element of the ring's subtree.
    #[must_use]
    pub fn root(&self) -> ElementHandle {
        Rc::clone(&self.root)
    }

    /// Event surface (`load-complete`).
    #[must_use]
    pub fn events(&self) -> Rc<EventTarget> {
        Rc::clone(&self.events)
    }

    /// Set the load progress, 0 to 100. Reflection is deferred.
    pub fn set_value(&self, value: f64) {
        let root = Rc::clone(&self.root);
        let events = Rc::clone(&self.events);
        let completed = Rc::clone(&self.completed);
        self.scheduler.schedule(move || {
            let rounded = value.round() as i64;
            root.set_property("value", json!(value));
            root.set_property("display", json!(format!("{rounded}%")));
            root.set_attribute("aria-valuenow", rounded.to_string());
            if rounded >= 100 && !completed.get() {
                completed.set(true);
                root.set_attribute("complete", "");
                events.dispatch(&Event::new("load-complete", json!({ "value": rounded })));
            }
        });
    }
}

impl Inspect for ProgressRing {
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

    #[test]
    fn value_reflection_is_deferred_until_drain() {
        let scheduler = UpdateScheduler::new();
        let ring = ProgressRing::new(&scheduler);

        ring.set_value(30.0);
        assert_eq!(ring.get_property("display"), None);

        scheduler.drain_batch();
        assert_eq!(ring.get_property("display"), Some(json!("30%")));
        assert_eq!(ring.root().attribute("aria-valuenow"), Some("30".into()));
    }

    #[test]
    fn completion_fires_load_complete_once() {
        let scheduler = UpdateScheduler::new();
        let ring = ProgressRing::new(&scheduler);
        let fired = Rc::new(Cell::new(0));

        let count = Rc::clone(&fired);
        ring.events()
            .add_listener("load-complete", move |_| count.set(count.get() + 1));

        ring.set_value(100.0);
        ring.set_value(100.0);
        scheduler.drain_batch();

        assert_eq!(fired.get(), 1);
        assert!(ring.root().has_attribute("complete"));
    }

    #[test]
    fn latest_value_wins_within_one_batch() {
        let scheduler = UpdateScheduler::new();
        let ring = ProgressRing::new(&scheduler);

        ring.set_value(10.0);
        ring.set_value(65.0);
        scheduler.drain_batch();

        assert_eq!(ring.get_property("display"), Some(json!("65%")));
    }
}
