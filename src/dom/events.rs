use crate::dom::document::{Document, NodeId};
use std::rc::Rc;

/// Only the click event is modelled; the course pages never listen for anything else.
pub const CLICK: &str = "click";

/// A click listener. It receives the document and the in-flight event, the
/// way a DOM handler sees `document` and `e`.
pub type Listener = Rc<dyn Fn(&mut Document, &mut ClickEvent)>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    target: NodeId,
    default_prevented: bool,
}

impl ClickEvent {
    pub(crate) fn new(target: NodeId) -> Self {
        Self {
            target,
            default_prevented: false,
        }
    }

    /// The element that was clicked (`this` inside the handler).
    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Auto,
    Smooth,
}

/// One `scrollIntoView` call against the viewport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollRecord {
    pub target: NodeId,
    pub behavior: ScrollBehavior,
}

/// Default link navigation that happened because no listener prevented it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub source: NodeId,
    pub href: String,
}
