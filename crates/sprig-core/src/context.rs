//! # Scoped contexts
//!
//! A compound widget (a dialog with its trigger, portal and content) shares
//! private wiring between its parts through contexts. A single shared context
//! would leak that wiring between two dialogs nested in each other, so
//! contexts are defined inside a named *namespace* and every widget instance
//! can ask the namespace's [`ScopeFactory`] for a fresh [`Scope`]: one new
//! slot per context, addressed by `(namespace, index)`.
//!
//! ```rust
//! use sprig_core::*;
//!
//! let mut ns = create_scope_namespace("Counter");
//! let count = ns.define_context::<u32>("Counter", None);
//! let factory = ns.finish();
//!
//! let a = factory.create_scope(None);
//! let b = factory.create_scope(None);
//!
//! count.provide(Some(&a), 1, || {
//!     assert_eq!(count.read(Some(&a), "CounterLabel"), Ok(1));
//!     assert!(count.read(Some(&b), "CounterLabel").is_err());
//! });
//! ```
//!
//! Reads without a scope, or with a scope that does not carry the namespace,
//! fall back to the context's own default slot.

use std::any::Any;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;

use crate::error::ContextError;

new_key_type! {
    /// Address of one live context slot.
    pub struct ContextKey;
}

#[derive(Debug)]
struct SlotRecord {
    namespace: Option<Rc<str>>,
    index: usize,
}

thread_local! {
    static SLOTS: RefCell<SlotMap<ContextKey, SlotRecord>> = RefCell::new(SlotMap::with_key());
    static PROVIDED: RefCell<Vec<(ContextKey, Rc<dyn Any>)>> = RefCell::new(Vec::new());
}

fn allocate(namespace: Option<Rc<str>>, index: usize) -> ContextKey {
    SLOTS.with(|s| s.borrow_mut().insert(SlotRecord { namespace, index }))
}

fn describe(key: ContextKey) -> String {
    SLOTS.with(|s| match s.borrow().get(key) {
        Some(SlotRecord {
            namespace: Some(ns),
            index,
        }) => format!("{ns}[{index}]"),
        Some(SlotRecord { namespace: None, .. }) => "standalone".to_string(),
        None => "released".to_string(),
    })
}

/// Number of context slots currently alive on this thread.
pub fn live_slot_count() -> usize {
    SLOTS.with(|s| s.borrow().len())
}

fn with_provided_frame<R>(key: ContextKey, value: Rc<dyn Any>, f: impl FnOnce() -> R) -> R {
    // Pops on unwind too, so an error boundary above sees a clean stack.
    struct Guard;
    impl Drop for Guard {
        fn drop(&mut self) {
            PROVIDED.with(|p| {
                p.borrow_mut().pop();
            });
        }
    }
    PROVIDED.with(|p| p.borrow_mut().push((key, value)));
    let _guard = Guard;
    f()
}

fn nearest_provided(key: ContextKey) -> Option<Rc<dyn Any>> {
    PROVIDED.with(|p| {
        p.borrow()
            .iter()
            .rev()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.clone())
    })
}

/// A context: a default slot plus its position inside a namespace.
#[derive(Clone)]
pub struct ContextSlot<T> {
    base: ContextKey,
    namespace: Option<Rc<str>>,
    index: usize,
    root_name: Rc<str>,
    default: Option<T>,
}

impl<T: Clone + 'static> ContextSlot<T> {
    fn allocate(namespace: Option<Rc<str>>, index: usize, root_name: &str, default: Option<T>) -> Self {
        Self {
            base: allocate(namespace.clone(), index),
            namespace,
            index,
            root_name: Rc::from(root_name),
            default,
        }
    }

    pub fn root_name(&self) -> &str {
        &self.root_name
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn default_value(&self) -> Option<&T> {
        self.default.as_ref()
    }

    /// The slot this context reads from and writes to under `scope`.
    pub fn resolve(&self, scope: Option<&Scope>) -> ContextKey {
        self.namespace
            .as_deref()
            .and_then(|ns| scope.and_then(|s| s.slot(ns, self.index)))
            .unwrap_or(self.base)
    }

    /// Makes `value` visible to reads under `scope` while `f` runs.
    pub fn provide<R>(&self, scope: Option<&Scope>, value: T, f: impl FnOnce() -> R) -> R {
        let key = self.resolve(scope);
        log::trace!("provide {} into {}", self.root_name, describe(key));
        with_provided_frame(key, Rc::new(value), f)
    }

    pub fn read(&self, scope: Option<&Scope>, consumer: &str) -> Result<T, ContextError> {
        let key = self.resolve(scope);
        if let Some(v) = nearest_provided(key)
            && let Some(v) = v.downcast_ref::<T>()
        {
            return Ok(v.clone());
        }
        self.default.clone().ok_or_else(|| ContextError {
            consumer: consumer.to_string(),
            root: self.root_name.to_string(),
        })
    }
}

impl<T> std::fmt::Debug for ContextSlot<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextSlot")
            .field("root_name", &self.root_name)
            .field("namespace", &self.namespace)
            .field("index", &self.index)
            .field("has_default", &self.default.is_some())
            .finish()
    }
}

/// A context outside any namespace; every reader shares its one slot.
pub fn create_context<T: Clone + 'static>(root_name: &str, default: Option<T>) -> ContextSlot<T> {
    ContextSlot::allocate(None, 0, root_name, default)
}

/// Fresh slots for one namespace; released when the last scope holding them
/// is dropped.
struct SlotSet {
    keys: SmallVec<[ContextKey; 4]>,
}

impl Drop for SlotSet {
    fn drop(&mut self) {
        let _ = SLOTS.try_with(|s| {
            let mut s = s.borrow_mut();
            for k in &self.keys {
                s.remove(*k);
            }
        });
    }
}

/// Namespace name → slot instances. Immutable; combining scopes builds a new
/// one.
#[derive(Clone, Default)]
pub struct Scope {
    namespaces: Rc<BTreeMap<Rc<str>, Rc<SlotSet>>>,
}

impl Scope {
    pub fn slots(&self, namespace: &str) -> Option<&[ContextKey]> {
        self.namespaces.get(namespace).map(|set| set.keys.as_slice())
    }

    pub fn slot(&self, namespace: &str, index: usize) -> Option<ContextKey> {
        self.slots(namespace).and_then(|keys| keys.get(index).copied())
    }

    pub fn contains(&self, namespace: &str) -> bool {
        self.namespaces.contains_key(namespace)
    }

    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.namespaces.keys().map(|k| &**k)
    }

    /// `self` overlaid with `other`; namespaces of `other` win.
    pub fn merged(&self, other: &Scope) -> Scope {
        let mut map = (*self.namespaces).clone();
        for (name, set) in other.namespaces.iter() {
            map.insert(name.clone(), set.clone());
        }
        Scope {
            namespaces: Rc::new(map),
        }
    }

    fn with_namespace(&self, name: Rc<str>, set: Rc<SlotSet>) -> Scope {
        let mut map = (*self.namespaces).clone();
        map.insert(name, set);
        Scope {
            namespaces: Rc::new(map),
        }
    }
}

impl std::fmt::Debug for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.namespaces.iter().map(|(k, v)| (k, &v.keys)))
            .finish()
    }
}

#[derive(Debug)]
struct Namespace {
    name: Rc<str>,
    slot_count: usize,
}

impl Namespace {
    fn instantiate(&self) -> Rc<SlotSet> {
        let keys = (0..self.slot_count)
            .map(|i| allocate(Some(self.name.clone()), i))
            .collect();
        log::trace!("scope {}: {} fresh slots", self.name, self.slot_count);
        Rc::new(SlotSet { keys })
    }
}

/// Collects the contexts of one namespace. Frozen by [`finish`](Self::finish).
pub struct NamespaceBuilder {
    name: Rc<str>,
    slot_count: usize,
    dependencies: Vec<ScopeFactory>,
}

pub fn create_scope_namespace(name: &str) -> NamespaceBuilder {
    NamespaceBuilder {
        name: Rc::from(name),
        slot_count: 0,
        dependencies: Vec::new(),
    }
}

impl NamespaceBuilder {
    /// Next context of this namespace; indices follow call order.
    pub fn define_context<T: Clone + 'static>(
        &mut self,
        root_name: &str,
        default: Option<T>,
    ) -> ContextSlot<T> {
        let index = self.slot_count;
        self.slot_count += 1;
        ContextSlot::allocate(Some(self.name.clone()), index, root_name, default)
    }

    /// Scopes created by the finished factory also carry `dependency`'s slots.
    pub fn depends_on(mut self, dependency: ScopeFactory) -> Self {
        self.dependencies.push(dependency);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn finish(self) -> ScopeFactory {
        let own = ScopeFactory {
            members: SmallVec::from_elem(
                Rc::new(Namespace {
                    name: self.name,
                    slot_count: self.slot_count,
                }),
                1,
            ),
        };
        compose_scope_namespaces(&own, &self.dependencies)
    }
}

/// Produces scopes for one or more namespaces. The first member names it.
#[derive(Clone, Debug)]
pub struct ScopeFactory {
    members: SmallVec<[Rc<Namespace>; 2]>,
}

impl ScopeFactory {
    pub fn name(&self) -> &str {
        &self.members[0].name
    }

    pub fn member_names(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|m| &*m.name)
    }

    /// `overrides` plus one slot set per member namespace. Members already
    /// present in `overrides` keep the slots found there.
    pub fn create_scope(&self, overrides: Option<&Scope>) -> Scope {
        let mut scope = overrides.cloned().unwrap_or_default();
        for member in &self.members {
            if !scope.contains(&member.name) {
                scope = scope.with_namespace(member.name.clone(), member.instantiate());
            }
        }
        scope
    }
}

/// One factory whose scopes hold the slots of every given namespace.
pub fn compose_scope_namespaces(first: &ScopeFactory, rest: &[ScopeFactory]) -> ScopeFactory {
    let mut members = first.members.clone();
    for factory in rest {
        for m in &factory.members {
            if !members.iter().any(|existing| existing.name == m.name) {
                members.push(m.clone());
            }
        }
    }
    ScopeFactory { members }
}
