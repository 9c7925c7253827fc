use anyhow::Result;

use crate::config::DialogConfig;

/// Class name a backend gives the root element of its rendered dialog in the
/// [`Document`](crate::dom::Document) tree. Outside-click detection queries
/// this class live, so clicks inside the dialog surface never count as
/// outside.
pub const SURFACE_CLASS: &str = "dialog-surface";

/// Invoked exactly once when the user resolves the dialog: `true` for the
/// confirm button, `false` for cancel.
pub type ResultCallback = Box<dyn FnMut(bool)>;

/// The seam to the external dialog library.
///
/// `show` may be called repeatedly while a dialog is visible (every property
/// update recomputes the config); a backend replaces its current dialog in
/// that case. Resolution must not hide the dialog: the adapter owns dismissal
/// timing and will call `close` when its `show` property flips to false.
pub trait DialogBackend {
    fn show(&mut self, config: DialogConfig, on_result: ResultCallback) -> Result<()>;
    fn close(&mut self) -> Result<()>;
}
