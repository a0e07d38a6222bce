//! In-memory host: commits node trees, keeps element identity between
//! commits and delivers events to committed elements.
//!
//! An element keeps its [`ElementHandle`] while it stays at the same position
//! (path of child indices, portals included) with the same tag. After each
//! commit every reference sink of a current element holds that element; sinks
//! of removed elements are released, unless the same sink was handed a new
//! element in this commit.

use std::collections::{BTreeMap, HashMap, HashSet};

use sprig_core::*;

struct Mounted {
    handle: ElementHandle,
    props: Props,
}

#[derive(Default)]
pub struct Host {
    mounted: HashMap<String, Mounted>,
    /// Keys of `mounted` in document order.
    order: Vec<String>,
    markup: String,
    containers: BTreeMap<String, String>,
}

struct Collected<'a> {
    elements: Vec<(String, &'a Element)>,
    containers: BTreeMap<String, String>,
}

fn collect<'a>(node: &'a Node, path: &str, out: &mut Collected<'a>) {
    match node {
        Node::Element(el) => {
            let key = format!("{path}:{}", el.tag());
            out.elements.push((key.clone(), el));
            for (i, child) in el.children().iter().enumerate() {
                collect(child, &format!("{key}/{i}"), out);
            }
        }
        Node::Slottable(children) => {
            for (i, child) in children.iter().enumerate() {
                collect(child, &format!("{path}.{i}"), out);
            }
        }
        Node::Portal(portal) => {
            out.containers
                .entry(portal.container.clone())
                .or_default()
                .push_str(&portal.child.to_markup());
            collect(&portal.child, &format!("{path}@{}", portal.container), out);
        }
        Node::Text(_) | Node::Empty => {}
    }
}

impl Host {
    pub fn new() -> Self {
        Self::default()
    }

    /// Composes one frame with `build` and commits its output.
    pub fn render(&mut self, build: impl FnOnce() -> Vec<Node>) {
        let roots = compose(build);
        self.commit(&roots);
    }

    pub fn commit(&mut self, roots: &[Node]) {
        let mut collected = Collected {
            elements: Vec::new(),
            containers: BTreeMap::new(),
        };
        for (i, root) in roots.iter().enumerate() {
            collect(root, &i.to_string(), &mut collected);
        }

        let mut next = HashMap::with_capacity(collected.elements.len());
        let mut order = Vec::with_capacity(collected.elements.len());
        for (key, el) in collected.elements {
            let handle = match self.mounted.get(&key) {
                Some(m) => m.handle.clone(),
                None => {
                    let handle = ElementHandle::new(el.tag());
                    log::trace!("host: mount {key} as {handle:?}");
                    handle
                }
            };
            next.insert(
                key.clone(),
                Mounted {
                    handle,
                    props: el.get_props().clone(),
                },
            );
            order.push(key);
        }

        let attached: HashSet<usize> = next
            .values()
            .filter_map(|m| m.props.get_node_ref())
            .flat_map(|r| r.leaf_ids().collect::<Vec<_>>())
            .collect();
        for (key, old) in self.mounted.drain() {
            if !next.contains_key(&key) {
                log::trace!("host: unmount {key}");
            }
            if let Some(r) = old.props.get_node_ref() {
                r.detach_except(|leaf| attached.contains(&leaf));
            }
        }
        for key in &order {
            let m = &next[key];
            if let Some(r) = m.props.get_node_ref() {
                r.attach(&m.handle);
            }
        }

        self.mounted = next;
        self.order = order;
        self.markup = markup_of(roots);
        self.containers = collected.containers;
    }

    /// Markup of the committed roots; portal content is not included.
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Markup rendered into a portal container, empty when none.
    pub fn container_markup(&self, container: &str) -> &str {
        self.containers.get(container).map_or("", String::as_str)
    }

    pub fn is_mounted(&self, handle: &ElementHandle) -> bool {
        self.mounted.values().any(|m| m.handle == *handle)
    }

    pub fn props_of(&self, handle: &ElementHandle) -> Option<&Props> {
        self.mounted
            .values()
            .find(|m| m.handle == *handle)
            .map(|m| &m.props)
    }

    /// First committed element, in document order, matching `pred`.
    pub fn find(&self, pred: impl Fn(&ElementHandle, &Props) -> bool) -> Option<ElementHandle> {
        self.order
            .iter()
            .map(|k| &self.mounted[k])
            .find(|m| pred(&m.handle, &m.props))
            .map(|m| m.handle.clone())
    }

    pub fn find_by_tag(&self, tag: &str) -> Option<ElementHandle> {
        self.find(|h, _| h.tag() == tag)
    }

    pub fn find_by_attr(&self, name: &str, value: &str) -> Option<ElementHandle> {
        self.find(|_, p| p.text(name) == Some(value))
    }

    /// Runs the target's handler for `event`. Returns whether one ran.
    pub fn dispatch(&self, target: &ElementHandle, event: Event) -> bool {
        let Some(props) = self.props_of(target) else {
            log::warn!("host: {:?} dropped, {target:?} is not mounted", event.kind());
            return false;
        };
        let Some(handler) = props.get_handler(&event.kind().handler_name()) else {
            return false;
        };
        handler(&event.with_target(target.id()));
        true
    }

    pub fn click(&self, target: &ElementHandle) -> bool {
        self.dispatch(target, Event::new(EventKind::Click))
    }

    /// Sets the running animation of `target` and reports its start.
    pub fn start_animation(&self, target: &ElementHandle, name: &str) -> bool {
        target.set_animation_name(name);
        self.dispatch(
            target,
            Event::animation(EventKind::AnimationStart, target.id(), name),
        )
    }

    pub fn end_animation(&self, target: &ElementHandle, name: &str) -> bool {
        self.dispatch(
            target,
            Event::animation(EventKind::AnimationEnd, target.id(), name),
        )
    }

    pub fn cancel_animation(&self, target: &ElementHandle, name: &str) -> bool {
        self.dispatch(
            target,
            Event::animation(EventKind::AnimationCancel, target.id(), name),
        )
    }
}
