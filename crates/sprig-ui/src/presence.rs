//! Keeps an element rendered until its exit animation has finished.
//!
//! The widget remembers one [`PresenceMachine`] per instance and wires it to
//! the controlled element through a reference sink and the element's
//! animation handlers. The state is driven by host events, so after an
//! `animationend` the next frame is the one that drops the element.

use std::cell::RefCell;
use std::rc::Rc;

use sprig_core::*;

/// Per-instance presence state and the wiring that feeds it.
#[derive(Clone)]
pub struct PresenceHandle {
    machine: Rc<RefCell<PresenceMachine>>,
    sink: NodeRef,
}

impl PresenceHandle {
    pub fn is_present(&self) -> bool {
        self.machine.borrow().is_present()
    }

    pub fn state(&self) -> PresenceState {
        self.machine.borrow().state()
    }

    /// Reference sink and animation handlers to put on the controlled element.
    pub fn props(&self) -> Props {
        let mut props = Props::new().node_ref(self.sink.clone());
        for name in ["onAnimationStart", "onAnimationEnd", "onAnimationCancel"] {
            let machine = self.machine.clone();
            props = props.on(name, move |ev| machine.borrow_mut().handle_event(ev));
        }
        props
    }

    /// Merges [`PresenceHandle::props`] onto `node`. Portals are looked
    /// through; anything that is not an element is returned as is.
    pub fn bind(&self, node: Node) -> Node {
        match node {
            Node::Element(el) => {
                let (tag, props, children) = el.into_parts();
                Element::new(tag)
                    .props(merge_props(self.props(), props))
                    .with_children(children)
                    .into()
            }
            Node::Portal(PortalNode { container, child }) => Node::Portal(PortalNode {
                container,
                child: Box::new(self.bind(*child)),
            }),
            other => other,
        }
    }
}

/// The presence state of the calling instance, updated with `present`.
pub fn use_presence(present: bool) -> PresenceHandle {
    let handle = remember(|| {
        let machine = Rc::new(RefCell::new(PresenceMachine::new(present)));
        let m = machine.clone();
        let sink = NodeRef::new(move |h| m.borrow_mut().attach(h.cloned()));
        PresenceHandle { machine, sink }
    });
    handle.machine.borrow_mut().set_present(present);
    (*handle).clone()
}

/// Renders `child` while `present`, and past that until its exit animation
/// ends.
pub fn Presence(present: bool, child: Node) -> Node {
    let presence = use_presence(present);
    if presence.is_present() {
        presence.bind(child)
    } else {
        Node::Empty
    }
}

/// Always renders; `render` learns whether the element is logically present
/// (for `data-state` and the like).
pub fn PresenceWith(present: bool, render: impl FnOnce(bool) -> Node) -> Node {
    let presence = use_presence(present);
    presence.bind(render(presence.is_present()))
}
