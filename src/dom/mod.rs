pub mod document;
pub mod events;
pub mod html;
pub mod selector;

pub use document::{Document, NodeId};
pub use events::{ClickEvent, Listener, Navigation, ScrollBehavior, ScrollRecord, CLICK};
pub use selector::Selector;
