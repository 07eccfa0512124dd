//! Headless element model for driving document-viewer components in tests.
//!
//! This crate provides:
//! - Element tree: attributes, duck-typed properties, descendant lookup by id
//! - Deferred updates: a microtask-granularity queue with batch draining
//! - Settle-wait: a future that resolves once queued updates are applied
//! - Events: ordered, synchronous listener dispatch with default prevention

pub mod element;
pub mod events;
pub mod scheduler;

pub use element::{Element, ElementHandle, Inspect};
pub use events::{Event, EventTarget};
pub use scheduler::{Settled, UpdateScheduler};
