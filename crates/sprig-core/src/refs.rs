//! Reference sinks: where a host reports the element a node was committed as.

use std::cell::RefCell;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::handle::ElementHandle;

type Sink = Rc<dyn Fn(Option<&ElementHandle>)>;

/// A sink receiving `Some(handle)` on attach and `None` on release.
///
/// Composed refs stay flat lists of their leaf sinks so a host can tell an
/// element swap (leaf re-attached in the same commit) from a removal.
#[derive(Clone)]
pub struct NodeRef {
    leaves: SmallVec<[Sink; 2]>,
}

impl NodeRef {
    pub fn new(f: impl Fn(Option<&ElementHandle>) + 'static) -> Self {
        let mut leaves = SmallVec::new();
        leaves.push(Rc::new(f) as Sink);
        Self { leaves }
    }

    pub fn attach(&self, handle: &ElementHandle) {
        for leaf in &self.leaves {
            leaf(Some(handle));
        }
    }

    pub fn detach(&self) {
        for leaf in &self.leaves {
            leaf(None);
        }
    }

    /// Stable identities of the leaf sinks.
    pub fn leaf_ids(&self) -> impl Iterator<Item = usize> + '_ {
        self.leaves.iter().map(|l| Rc::as_ptr(l) as *const () as usize)
    }

    /// Releases only the leaves whose id is not in `keep`.
    pub fn detach_except(&self, keep: impl Fn(usize) -> bool) {
        for leaf in &self.leaves {
            if !keep(Rc::as_ptr(leaf) as *const () as usize) {
                leaf(None);
            }
        }
    }

    pub fn ptr_eq(&self, other: &NodeRef) -> bool {
        self.leaf_ids().eq(other.leaf_ids())
    }
}

impl std::fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NodeRef(<{} sinks>)", self.leaves.len())
    }
}

/// One sink forwarding to all of `refs`, in order.
pub fn compose_refs(refs: impl IntoIterator<Item = NodeRef>) -> NodeRef {
    NodeRef {
        leaves: refs.into_iter().flat_map(|r| r.leaves).collect(),
    }
}

/// Cell holding the element a node was last committed as.
#[derive(Clone)]
pub struct ElementRef {
    current: Rc<RefCell<Option<ElementHandle>>>,
    sink: NodeRef,
}

impl ElementRef {
    pub fn new() -> Self {
        let current: Rc<RefCell<Option<ElementHandle>>> = Rc::new(RefCell::new(None));
        let cell = current.clone();
        let sink = NodeRef::new(move |h| *cell.borrow_mut() = h.cloned());
        Self { current, sink }
    }

    pub fn get(&self) -> Option<ElementHandle> {
        self.current.borrow().clone()
    }

    /// The same sink on every call.
    pub fn sink(&self) -> NodeRef {
        self.sink.clone()
    }
}

impl Default for ElementRef {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ElementRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ElementRef").field(&*self.current.borrow()).finish()
    }
}
