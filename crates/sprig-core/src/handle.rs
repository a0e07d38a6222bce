use std::cell::{Cell, RefCell};
use std::rc::Rc;

use taffy::Display;

pub type ElementId = u64;

thread_local! {
    static NEXT_ELEMENT_ID: Cell<ElementId> = const { Cell::new(1) };
}

/// Resolved style of a committed element, as far as the core cares about it.
#[derive(Clone, Debug, PartialEq)]
pub struct ComputedStyle {
    /// Comma separated list of running animation names, `"none"` when idle.
    pub animation_name: String,
    pub display: Display,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            animation_name: "none".to_string(),
            display: Display::Block,
        }
    }
}

/// Host-owned identity of a committed element.
///
/// Clones share the same live style, like a computed style declaration does.
#[derive(Clone)]
pub struct ElementHandle {
    id: ElementId,
    tag: Rc<str>,
    style: Rc<RefCell<ComputedStyle>>,
}

impl ElementHandle {
    pub fn new(tag: &str) -> Self {
        let id = NEXT_ELEMENT_ID.with(|n| {
            let id = n.get();
            n.set(id + 1);
            id
        });
        Self {
            id,
            tag: Rc::from(tag),
            style: Rc::new(RefCell::new(ComputedStyle::default())),
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn animation_name(&self) -> String {
        let name = self.style.borrow().animation_name.clone();
        if name.trim().is_empty() {
            "none".to_string()
        } else {
            name
        }
    }

    pub fn set_animation_name(&self, name: impl Into<String>) {
        self.style.borrow_mut().animation_name = name.into();
    }

    pub fn set_display(&self, display: Display) {
        self.style.borrow_mut().display = display;
    }

    pub fn is_hidden(&self) -> bool {
        self.style.borrow().display == Display::None
    }

    pub fn style(&self) -> ComputedStyle {
        self.style.borrow().clone()
    }
}

impl PartialEq for ElementHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ElementHandle {}

impl std::fmt::Debug for ElementHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElementHandle")
            .field("id", &self.id)
            .field("tag", &self.tag)
            .field("style", &*self.style.borrow())
            .finish()
    }
}
