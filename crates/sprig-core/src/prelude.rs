pub use crate::context::{
    ContextSlot, Scope, ScopeFactory, compose_scope_namespaces, create_context,
    create_scope_namespace,
};
pub use crate::element::{Element, Node, PropValue, Props, Style, markup_of};
pub use crate::error::{ContextError, StructuralViolation, UiError};
pub use crate::event::{Event, EventHandler, EventKind, compose_event_handlers};
pub use crate::handle::{ElementHandle, ElementId};
pub use crate::presence::{PresenceMachine, PresenceState};
pub use crate::refs::{ElementRef, NodeRef, compose_refs};
pub use crate::runtime::{compose, remember, remember_state, remember_with_key};
pub use crate::slot::{merge_into_single_child, merge_props};
