//! Mock transport between the viewer shell and its embedded plugin surface.
//!
//! Tests use the bridge both ways:
//! - outbound: components under test record the calls they would make toward
//!   the plugin (`record_call`), and scenarios verify counts and arguments
//! - inbound: scenarios inject synthetic plugin messages (`inject`), which
//!   are delivered synchronously to registered listeners in order
//!
//! The bridge never talks to a real embedded surface and has no transport
//! failures; injecting with no listeners registered is a silent no-op.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An inbound message as the plugin surface would post it: a `kind`
/// discriminator plus a structured body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Message type discriminator.
    pub kind: String,
    /// Structured payload.
    pub body: Value,
}

impl Message {
    /// Build a message with a payload.
    #[must_use]
    pub fn new(kind: impl Into<String>, body: Value) -> Self {
        Self {
            kind: kind.into(),
            body,
        }
    }

    /// Build a bare message with a null body.
    #[must_use]
    pub fn named(kind: impl Into<String>) -> Self {
        Self::new(kind, Value::Null)
    }
}

/// One logged outbound invocation toward the plugin surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedCall {
    /// Method the component invoked.
    pub method: String,
    /// Arguments, in call order.
    pub args: Vec<Value>,
    /// Position within this bridge instance's call log, starting at 0.
    pub seq: u64,
}

type MessageListener = Rc<dyn Fn(&Message)>;

/// Mock two-way channel: an ordered outbound call log plus an ordered inbound
/// listener registry. Shared across components via `Rc`; the call log is
/// cleared only by replacing the bridge instance.
#[derive(Default)]
pub struct PluginBridge {
    calls: RefCell<Vec<RecordedCall>>,
    listeners: RefCell<Vec<MessageListener>>,
}

impl PluginBridge {
    /// Create a new shared bridge.
    #[must_use]
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Record an outbound call. Never fails.
    pub fn record_call(&self, method: impl Into<String>, args: Vec<Value>) {
        let mut calls = self.calls.borrow_mut();
        let seq = calls.len() as u64;
        calls.push(RecordedCall {
            method: method.into(),
            args,
            seq,
        });
    }

    /// Number of recorded calls with this method name; 0 if never called.
    #[must_use]
    pub fn call_count(&self, method: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.method == method)
            .count()
    }

    /// Ordered argument lists of recorded calls with this method name.
    #[must_use]
    pub fn calls_for(&self, method: &str) -> Vec<Vec<Value>> {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.method == method)
            .map(|call| call.args.clone())
            .collect()
    }

    /// Full call log snapshot, in call order.
    #[must_use]
    pub fn call_log(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    /// Register an inbound-message listener. Listeners receive every injected
    /// message in registration order.
    pub fn on_message(&self, listener: impl Fn(&Message) + 'static) {
        self.listeners.borrow_mut().push(Rc::new(listener));
    }

    /// Inject a synthetic inbound message, delivered synchronously to all
    /// listeners in registration order. With no listeners registered this is
    /// a silent no-op.
    pub fn inject(&self, message: &Message) {
        // Snapshot so a listener may register further listeners without
        // poisoning the borrow.
        let listeners: Vec<MessageListener> = self.listeners.borrow().clone();
        for listener in &listeners {
            listener(message);
        }
    }
}
