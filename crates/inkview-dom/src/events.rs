//! Ordered, synchronous event dispatch.
//!
//! No global bus: each component owns an [`EventTarget`] and dispatch walks
//! the listeners registered for the event kind, in registration order, on the
//! caller's stack. Dispatching a kind nobody listens to is a no-op.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde_json::Value;

/// A synthetic event: a kind discriminator plus a structured detail payload.
#[derive(Debug)]
pub struct Event {
    kind: String,
    detail: Value,
    default_prevented: Cell<bool>,
}

impl Event {
    /// Create an event with a detail payload.
    #[must_use]
    pub fn new(kind: impl Into<String>, detail: Value) -> Self {
        Self {
            kind: kind.into(),
            detail,
            default_prevented: Cell::new(false),
        }
    }

    /// Create an event with no payload.
    #[must_use]
    pub fn named(kind: impl Into<String>) -> Self {
        Self::new(kind, Value::Null)
    }

    /// Event kind discriminator.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Structured detail payload.
    #[must_use]
    pub fn detail(&self) -> &Value {
        &self.detail
    }

    /// Mark the event's default action as cancelled.
    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    /// Whether any listener cancelled the default action.
    #[must_use]
    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

type Listener = Rc<dyn Fn(&Event)>;

/// Per-component listener registry with ordered synchronous dispatch.
#[derive(Default)]
pub struct EventTarget {
    listeners: RefCell<Vec<(String, Listener)>>,
}

impl EventTarget {
    /// Create an empty target.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for an event kind. Listeners fire in registration
    /// order and are never deduplicated.
    pub fn add_listener(&self, kind: impl Into<String>, listener: impl Fn(&Event) + 'static) {
        self.listeners
            .borrow_mut()
            .push((kind.into(), Rc::new(listener)));
    }

    /// Dispatch an event synchronously to matching listeners, in registration
    /// order. Returns the number of listeners invoked; zero listeners is a
    /// silent no-op.
    pub fn dispatch(&self, event: &Event) -> usize {
        // Snapshot first: a listener may register further listeners, which
        // only see later dispatches.
        let matching: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .filter(|(kind, _)| kind == event.kind())
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in &matching {
            listener(event);
        }
        matching.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn listeners_fire_in_registration_order() {
        let target = EventTarget::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let order = Rc::clone(&order);
            target.add_listener("change", move |_| order.borrow_mut().push(tag));
        }

        let fired = target.dispatch(&Event::named("change"));
        assert_eq!(fired, 3);
        assert_eq!(*order.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn dispatch_without_listeners_is_a_no_op() {
        let target = EventTarget::new();
        assert_eq!(target.dispatch(&Event::named("save-requested")), 0);
    }

    #[test]
    fn listeners_only_see_their_kind() {
        let target = EventTarget::new();
        let hits = Rc::new(Cell::new(0));
        let count = Rc::clone(&hits);
        target.add_listener("open", move |_| count.set(count.get() + 1));

        target.dispatch(&Event::named("close"));
        assert_eq!(hits.get(), 0);
        target.dispatch(&Event::named("open"));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn prevent_default_is_visible_to_the_dispatcher() {
        let target = EventTarget::new();
        target.add_listener("beforeunload", |event| event.prevent_default());

        let event = Event::new("beforeunload", json!({"edits": 1}));
        target.dispatch(&event);
        assert!(event.default_prevented());
    }

    #[test]
    fn listener_registered_during_dispatch_waits_for_next_dispatch() {
        let target = Rc::new(EventTarget::new());
        let hits = Rc::new(Cell::new(0));

        let outer_target = Rc::clone(&target);
        let outer_hits = Rc::clone(&hits);
        target.add_listener("open", move |_| {
            let inner_hits = Rc::clone(&outer_hits);
            outer_target.add_listener("open", move |_| inner_hits.set(inner_hits.get() + 1));
        });

        assert_eq!(target.dispatch(&Event::named("open")), 1);
        assert_eq!(hits.get(), 0);
        assert_eq!(target.dispatch(&Event::named("open")), 2);
        assert_eq!(hits.get(), 1);
    }
}
