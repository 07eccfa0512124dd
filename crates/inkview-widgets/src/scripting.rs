//! Scripting-surface connect gate.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::json;

use inkview_bridge::{Message, PluginBridge};
use inkview_dom::{Event, EventTarget, UpdateScheduler};

/// Gatekeeper for `connect` requests from the embedded scripting surface.
///
/// A connect is granted only when the gate has an authorization token
/// configured and the request carries the same token. The verdict is
/// delivered asynchronously (one scheduler task after the injection), as the
/// real viewer answers on a later microtask: `connection-granted` or
/// `connection-denied` fires exactly once per attempt.
pub struct ScriptingGate {
    events: Rc<EventTarget>,
    token: Rc<RefCell<Option<String>>>,
}

impl ScriptingGate {
    /// Create a gate and register it on the bridge's inbound side.
    #[must_use]
    pub fn new(bridge: &Rc<PluginBridge>, scheduler: &Rc<UpdateScheduler>) -> Self {
        let events = Rc::new(EventTarget::new());
        let token: Rc<RefCell<Option<String>>> = Rc::new(RefCell::new(None));

        let gate_events = Rc::clone(&events);
        let gate_token = Rc::clone(&token);
        let gate_scheduler = Rc::clone(scheduler);
        bridge.on_message(move |message: &Message| {
            if message.kind != "connect" {
                return;
            }
            let offered = message.body["token"].as_str().map(str::to_owned);
            let granted = match (&*gate_token.borrow(), &offered) {
                (Some(expected), Some(offered)) => expected == offered,
                _ => false,
            };
            let events = Rc::clone(&gate_events);
            gate_scheduler.schedule(move || {
                let kind = if granted {
                    "connection-granted"
                } else {
                    "connection-denied"
                };
                events.dispatch(&Event::new(kind, json!({ "granted": granted })));
            });
        });

        Self { events, token }
    }

    /// Configure the token connects must present. `None` denies everything.
    pub fn set_token(&self, token: Option<String>) {
        *self.token.borrow_mut() = token;
    }

    /// Event surface (`connection-granted`, `connection-denied`).
    #[must_use]
    pub fn events(&self) -> Rc<EventTarget> {
        Rc::clone(&self.events)
    }
}
