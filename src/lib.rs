//! Declarative dialog adapter.
//!
//! Wraps an imperative modal-dialog backend behind a declarative property
//! set: callers describe the dialog they want (`DialogProps`) and flip a
//! `show` flag; the adapter derives an immutable `DialogConfig` snapshot and
//! issues the matching show/close calls, wiring up the optional escape-key
//! and outside-click side channels along the way.

pub mod adapter;
pub mod backend;
pub mod config;
pub mod dom;
pub mod keys;
pub mod props;
pub mod tui;

pub use adapter::DialogAdapter;
pub use backend::{DialogBackend, ResultCallback, SURFACE_CLASS};
pub use config::DialogConfig;
pub use dom::{Document, ElementId, OutsideTargetHandler, PointerEvent, PointerKind, TargetQuery};
pub use keys::Shortcuts;
pub use props::{ConfirmFn, DialogKind, DialogProps, EventFn, InputKind, PropsWarning};
pub use tui::TuiBackend;
