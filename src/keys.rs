use std::collections::HashMap;

use crossterm::event::KeyCode;

use crate::props::EventFn;

/// Process-wide keyboard-shortcut table.
///
/// One callback per key; binding a key that is already bound supersedes the
/// previous callback. The dialog adapter uses this for its escape-key
/// binding, scoped to the time a dialog is shown.
#[derive(Default)]
pub struct Shortcuts {
    bindings: HashMap<KeyCode, EventFn>,
}

impl Shortcuts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `key` to `callback`, replacing any existing binding for it.
    pub fn bind(&mut self, key: KeyCode, callback: EventFn) {
        self.bindings.insert(key, callback);
    }

    /// Remove the binding for `key`, if any.
    pub fn unbind(&mut self, key: KeyCode) {
        self.bindings.remove(&key);
    }

    pub fn is_bound(&self, key: KeyCode) -> bool {
        self.bindings.contains_key(&key)
    }

    /// Fire the callback bound to `key`. Returns whether one was bound.
    pub fn dispatch(&self, key: KeyCode) -> bool {
        match self.bindings.get(&key) {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn bind_dispatch_unbind_cycle() {
        let fired = Rc::new(Cell::new(0));
        let count = fired.clone();

        let mut shortcuts = Shortcuts::new();
        shortcuts.bind(KeyCode::Esc, Rc::new(move || count.set(count.get() + 1)));
        assert!(shortcuts.is_bound(KeyCode::Esc));

        assert!(shortcuts.dispatch(KeyCode::Esc));
        assert!(!shortcuts.dispatch(KeyCode::Enter));
        assert_eq!(fired.get(), 1);

        shortcuts.unbind(KeyCode::Esc);
        assert!(!shortcuts.dispatch(KeyCode::Esc));
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn rebinding_supersedes() {
        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));

        let mut shortcuts = Shortcuts::new();
        let a = first.clone();
        shortcuts.bind(KeyCode::Esc, Rc::new(move || a.set(a.get() + 1)));
        let b = second.clone();
        shortcuts.bind(KeyCode::Esc, Rc::new(move || b.set(b.get() + 1)));

        shortcuts.dispatch(KeyCode::Esc);
        assert_eq!(first.get(), 0);
        assert_eq!(second.get(), 1);
    }
}
