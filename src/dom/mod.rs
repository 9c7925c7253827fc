pub mod outside;

pub use outside::{OutsideTargetHandler, TargetQuery};

use std::collections::HashMap;
use std::rc::Rc;

/// Stable identifier for an element in the [`Document`] tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(u64);

/// Identifier for a registered document-level listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// The two pointer event kinds outside-click detection listens for.
///
/// Listening on press (not click) means the check runs before any
/// click-triggered side effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    MouseDown,
    TouchStart,
}

/// A pointer event with its origin element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub target: ElementId,
}

impl PointerEvent {
    pub fn mouse_down(target: ElementId) -> Self {
        Self {
            kind: PointerKind::MouseDown,
            target,
        }
    }

    pub fn touch_start(target: ElementId) -> Self {
        Self {
            kind: PointerKind::TouchStart,
            target,
        }
    }
}

/// Handler invoked when a pointer event is dispatched through the document.
pub type PointerHandler = Rc<dyn Fn(&Document, &PointerEvent)>;

struct Node {
    parent: Option<ElementId>,
    class: Option<String>,
}

struct Listener {
    id: ListenerId,
    kind: PointerKind,
    handler: PointerHandler,
}

/// Process-wide document service: a DOM-like element tree plus the
/// document-level pointer listener slots.
///
/// Single-threaded by design; callers are responsible for symmetric
/// add/remove of listeners (the adapter guarantees this).
#[derive(Default)]
pub struct Document {
    nodes: HashMap<ElementId, Node>,
    listeners: Vec<Listener>,
    next_element: u64,
    next_listener: u64,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an element, optionally parented and optionally carrying a class
    /// name usable in [`Document::elements_by_class`] queries.
    pub fn create_element(
        &mut self,
        parent: Option<ElementId>,
        class: Option<&str>,
    ) -> ElementId {
        let id = ElementId(self.next_element);
        self.next_element += 1;
        self.nodes.insert(
            id,
            Node {
                parent,
                class: class.map(str::to_string),
            },
        );
        id
    }

    /// Remove an element and all of its descendants.
    pub fn remove_element(&mut self, id: ElementId) {
        let doomed: Vec<ElementId> = self
            .nodes
            .keys()
            .copied()
            .filter(|candidate| self.is_within(*candidate, id))
            .collect();
        for element in doomed {
            self.nodes.remove(&element);
        }
    }

    pub fn contains_element(&self, id: ElementId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Whether `target` is `ancestor` itself or one of its descendants.
    pub fn is_within(&self, target: ElementId, ancestor: ElementId) -> bool {
        let mut current = Some(target);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(&id).and_then(|node| node.parent);
        }
        false
    }

    /// Live query: elements currently carrying `class`.
    pub fn elements_by_class(&self, class: &str) -> Vec<ElementId> {
        let mut found: Vec<ElementId> = self
            .nodes
            .iter()
            .filter(|(_, node)| node.class.as_deref() == Some(class))
            .map(|(id, _)| *id)
            .collect();
        found.sort_by_key(|id| id.0);
        found
    }

    /// Attach a handler to one of the document-level pointer slots.
    pub fn add_listener(&mut self, kind: PointerKind, handler: PointerHandler) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push(Listener { id, kind, handler });
        id
    }

    /// Detach a previously registered handler. Unknown ids are a no-op.
    pub fn remove_listener(&mut self, id: ListenerId) {
        self.listeners.retain(|listener| listener.id != id);
    }

    /// Number of handlers attached for a given pointer kind.
    pub fn listener_count(&self, kind: PointerKind) -> usize {
        self.listeners
            .iter()
            .filter(|listener| listener.kind == kind)
            .count()
    }

    /// Deliver a pointer event to every listener registered for its kind.
    pub fn dispatch(&self, event: PointerEvent) {
        let handlers: Vec<PointerHandler> = self
            .listeners
            .iter()
            .filter(|listener| listener.kind == event.kind)
            .map(|listener| listener.handler.clone())
            .collect();
        for handler in handlers {
            handler(self, &event);
        }
    }
}
