use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use crossterm::event::KeyCode;
use log::warn;

use crate::backend::{DialogBackend, SURFACE_CLASS};
use crate::config::DialogConfig;
use crate::dom::{Document, ListenerId, OutsideTargetHandler, PointerKind, TargetQuery};
use crate::keys::Shortcuts;
use crate::props::{DialogProps, EventFn};

/// The active outside-click binding: both document listener slots plus the
/// callback handle used for identity comparison on later updates.
struct OutsideRegistration {
    callback: EventFn,
    mouse: ListenerId,
    touch: ListenerId,
}

/// Translates a declarative [`DialogProps`] set into imperative show/close
/// calls on a [`DialogBackend`], and manages the escape-key and outside-click
/// side channels.
///
/// Lifecycle is an explicit state machine: [`DialogAdapter::mount`] moves
/// `Unmounted -> Mounted`, [`DialogAdapter::apply`] processes one property
/// update, and [`DialogAdapter::teardown`] consumes the adapter, releasing
/// every global registration on the way out. Visibility is owned here (never
/// read back from the backend), which is what makes double-close and
/// double-register structurally impossible.
pub struct DialogAdapter<B: DialogBackend> {
    backend: B,
    document: Rc<RefCell<Document>>,
    shortcuts: Rc<RefCell<Shortcuts>>,
    props: DialogProps,
    shown: bool,
    escape_bound: bool,
    outside: Option<OutsideRegistration>,
}

impl<B: DialogBackend> DialogAdapter<B> {
    /// Mount with an initial prop set: runs one sync pass and, if an
    /// outside-click callback is supplied, registers its handler.
    pub fn mount(
        backend: B,
        document: Rc<RefCell<Document>>,
        shortcuts: Rc<RefCell<Shortcuts>>,
        props: DialogProps,
    ) -> Result<Self> {
        let mut adapter = Self {
            backend,
            document,
            shortcuts,
            props,
            shown: false,
            escape_bound: false,
            outside: None,
        };
        adapter.sync()?;
        if let Some(callback) = adapter.props.on_outside_click.clone() {
            adapter.register_outside(callback);
        }
        Ok(adapter)
    }

    /// Apply a new prop set.
    ///
    /// Fixed order per update: validation warnings, then show/close against
    /// the backend, then outside-click reconciliation.
    pub fn apply(&mut self, props: DialogProps) -> Result<()> {
        let previous_outside = self.props.on_outside_click.clone();
        self.props = props;
        // Reconcile even when the backend call failed: the registration must
        // track the stored props, or the next update compares against the
        // wrong previous callback.
        let synced = self.sync();
        self.reconcile_outside(previous_outside);
        synced
    }

    /// Unmount: unconditionally drop the outside-click registration, then
    /// close the dialog if it is currently shown. A never-shown adapter makes
    /// no backend call here.
    pub fn teardown(mut self) -> Result<()> {
        self.unregister_outside();
        if self.shown {
            self.backend.close()?;
            self.unbind_escape();
            if let Some(callback) = &self.props.on_close {
                callback();
            }
            self.shown = false;
        }
        Ok(())
    }

    pub fn is_shown(&self) -> bool {
        self.shown
    }

    pub fn props(&self) -> &DialogProps {
        &self.props
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// One show/close pass against the current props.
    fn sync(&mut self) -> Result<()> {
        for warning in self.props.validate() {
            warn!("{warning}");
        }

        if self.props.show {
            let config = DialogConfig::from_props(&self.props);
            let on_confirm = self.props.on_confirm.clone();
            let on_cancel = self.props.on_cancel.clone();
            self.backend.show(
                config,
                Box::new(move |confirmed| {
                    // Exactly one of the two fires per resolution; absent
                    // callbacks are a silent no-op.
                    if confirmed {
                        if let Some(callback) = &on_confirm {
                            callback(true);
                        }
                    } else if let Some(callback) = &on_cancel {
                        callback();
                    }
                }),
            )?;
            self.shown = true;

            match self.props.on_escape_key.clone() {
                Some(callback) => {
                    self.shortcuts.borrow_mut().bind(KeyCode::Esc, callback);
                    self.escape_bound = true;
                }
                None => self.unbind_escape(),
            }
        } else if self.shown {
            self.backend.close()?;
            self.unbind_escape();
            if let Some(callback) = &self.props.on_close {
                callback();
            }
            self.shown = false;
        }

        Ok(())
    }

    /// Compare the previous and current outside-click callbacks by handle
    /// identity and rebuild the registration only when they differ.
    fn reconcile_outside(&mut self, previous: Option<EventFn>) {
        let next = self.props.on_outside_click.clone();
        match (previous, next) {
            (Some(old), Some(new)) => {
                if !Rc::ptr_eq(&old, &new) {
                    self.unregister_outside();
                    self.register_outside(new);
                }
            }
            (Some(_), None) => self.unregister_outside(),
            (None, Some(new)) => self.register_outside(new),
            (None, None) => {}
        }
    }

    fn register_outside(&mut self, callback: EventFn) {
        let handler = OutsideTargetHandler::new(
            TargetQuery::Class(SURFACE_CLASS.to_string()),
            callback.clone(),
        );
        let listener = handler.into_listener();
        let mut document = self.document.borrow_mut();
        let mouse = document.add_listener(PointerKind::MouseDown, listener.clone());
        let touch = document.add_listener(PointerKind::TouchStart, listener);
        self.outside = Some(OutsideRegistration {
            callback,
            mouse,
            touch,
        });
    }

    fn unregister_outside(&mut self) {
        if let Some(registration) = self.outside.take() {
            let mut document = self.document.borrow_mut();
            document.remove_listener(registration.mouse);
            document.remove_listener(registration.touch);
        }
    }

    fn unbind_escape(&mut self) {
        if self.escape_bound {
            self.shortcuts.borrow_mut().unbind(KeyCode::Esc);
            self.escape_bound = false;
        }
    }
}
