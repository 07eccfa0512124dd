//! Headless stand-ins for the document-viewer components the harness drives.
//!
//! Each widget owns an element subtree, batches observable mutations through
//! the shared [`inkview_dom::UpdateScheduler`], and exchanges traffic with the
//! embedded plugin surface through the shared [`inkview_bridge::PluginBridge`].
//! None of them render anything; they expose exactly the contract the
//! scenarios assert on: settable properties with deferred reflection,
//! queryable descendants and attributes after settling, and ordered event
//! emission.

pub mod attachments;
pub mod dropdown;
pub mod progress;
pub mod save;
pub mod scripting;
pub mod toolbar;
pub mod unload;

pub use attachments::{Attachment, AttachmentBar};
pub use dropdown::DropdownMenu;
pub use progress::ProgressRing;
pub use save::{PendingSave, SaveController, SaveError, SavedFile};
pub use scripting::ScriptingGate;
pub use toolbar::ViewerToolbar;
pub use unload::UnloadGuard;
