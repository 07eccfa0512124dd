//! Save-file round trip between the viewer shell and the plugin surface.

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use futures::channel::oneshot;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use inkview_bridge::{Message, PluginBridge};

/// Why a requested save did not produce a file.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SaveError {
    /// The plugin reported the save as failed.
    #[error("save rejected by plugin: {0}")]
    Rejected(String),
    /// The request was superseded or the controller went away before the
    /// plugin answered.
    #[error("save aborted before the plugin answered")]
    Aborted,
}

/// Successful save-file outcome reported by the plugin.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SavedFile {
    /// Name the file was saved under.
    pub file_name: String,
    /// Size of the written data in bytes.
    pub data_size: u64,
}

type SaveSlot = Rc<RefCell<Option<oneshot::Sender<Result<SavedFile, SaveError>>>>>;

/// Drives the save-file flow: records the outbound `save` call and completes
/// the returned handle from the plugin's `save-done` / `save-failed` answer.
///
/// At most one save is in flight; a second request supersedes the first,
/// which then resolves to [`SaveError::Aborted`]. Each handle resolves or
/// rejects exactly once.
pub struct SaveController {
    bridge: Rc<PluginBridge>,
    pending: SaveSlot,
}

impl SaveController {
    /// Create a controller and register it on the bridge's inbound side.
    #[must_use]
    pub fn new(bridge: &Rc<PluginBridge>) -> Self {
        let pending: SaveSlot = Rc::new(RefCell::new(None));

        let slot = Rc::clone(&pending);
        bridge.on_message(move |message: &Message| {
            let outcome = match message.kind.as_str() {
                "save-done" => match serde_json::from_value::<SavedFile>(message.body.clone()) {
                    Ok(file) => Ok(file),
                    Err(_) => Err(SaveError::Rejected("malformed save-done payload".into())),
                },
                "save-failed" => {
                    let reason = message.body["reason"].as_str().unwrap_or("unknown");
                    Err(SaveError::Rejected(reason.to_owned()))
                }
                _ => return,
            };
            if let Some(sender) = slot.borrow_mut().take() {
                // The requester may have dropped its handle; that is fine.
                let _ = sender.send(outcome);
            }
        });

        Self {
            bridge: Rc::clone(bridge),
            pending,
        }
    }

    /// Request a save of the given kind (`"original"` or `"edited"`).
    ///
    /// Records the outbound call immediately and returns a handle that the
    /// plugin's answer resolves exactly once.
    pub fn request_save(&self, kind: &str) -> PendingSave {
        self.bridge.record_call("save", vec![json!(kind)]);
        let (sender, receiver) = oneshot::channel();
        // Dropping a superseded sender cancels the old receiver, which reads
        // back as Aborted.
        *self.pending.borrow_mut() = Some(sender);
        PendingSave { receiver }
    }

    /// Whether a save request is still waiting for the plugin's answer.
    #[must_use]
    pub fn save_in_flight(&self) -> bool {
        self.pending.borrow().is_some()
    }
}

/// Suspension handle for one save round trip.
pub struct PendingSave {
    receiver: oneshot::Receiver<Result<SavedFile, SaveError>>,
}

impl Future for PendingSave {
    type Output = Result<SavedFile, SaveError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.receiver)
            .poll(cx)
            .map(|answer| answer.unwrap_or(Err(SaveError::Aborted)))
    }
}
