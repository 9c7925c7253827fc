use std::rc::Rc;

use crate::dom::{Document, ElementId, PointerEvent, PointerHandler};
use crate::props::EventFn;

/// How the outside-click target set is resolved.
///
/// `Class` is resolved against the document at event time, so surfaces that
/// appear or disappear between registration and the event are handled
/// correctly (the equivalent of a live DOM collection).
#[derive(Debug, Clone)]
pub enum TargetQuery {
    Elements(Vec<ElementId>),
    Class(String),
}

impl TargetQuery {
    fn resolve(&self, document: &Document) -> Vec<ElementId> {
        match self {
            TargetQuery::Elements(elements) => elements.clone(),
            TargetQuery::Class(class) => document.elements_by_class(class),
        }
    }
}

/// Detects pointer events originating outside a set of target elements.
///
/// The handler fires its callback when the event target is not
/// descendant-or-self of any target; otherwise it does nothing. With an empty
/// target set every pointer event counts as outside.
pub struct OutsideTargetHandler {
    targets: TargetQuery,
    on_outside: EventFn,
}

impl OutsideTargetHandler {
    pub fn new(targets: TargetQuery, on_outside: EventFn) -> Self {
        Self {
            targets,
            on_outside,
        }
    }

    /// Run the outside check for one pointer event.
    pub fn handle(&self, document: &Document, event: &PointerEvent) {
        let inside = self
            .targets
            .resolve(document)
            .into_iter()
            .any(|target| document.is_within(event.target, target));
        if !inside {
            (self.on_outside)();
        }
    }

    /// Wrap the handler for registration in a document listener slot.
    pub fn into_listener(self) -> PointerHandler {
        Rc::new(move |document, event| self.handle(document, event))
    }
}
