use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::rc::Rc;

use crate::event::{Event, EventHandler};
use crate::refs::NodeRef;

pub const CLASS: &str = "class";
pub const STYLE: &str = "style";

/// Inline style declarations, ordered by property name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Style(BTreeMap<String, String>);

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.0.insert(name.into(), value.to_string());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl ToString) {
        self.0.insert(name.into(), value.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `self` overlaid with `over`; keys of `over` win.
    pub fn merged(&self, over: &Style) -> Style {
        let mut out = self.clone();
        for (k, v) in over.iter() {
            out.0.insert(k.to_string(), v.to_string());
        }
        out
    }

    pub fn to_css(&self) -> String {
        self.iter()
            .map(|(k, v)| format!("{k}: {v}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Clone)]
pub enum PropValue {
    Text(String),
    Bool(bool),
    Number(f64),
    Style(Style),
    Handler(EventHandler),
}

impl PropValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_handler(&self) -> Option<&EventHandler> {
        match self {
            PropValue::Handler(h) => Some(h),
            _ => None,
        }
    }

    /// Falsy in the attribute sense: empty text or `false`.
    pub fn is_falsy(&self) -> bool {
        match self {
            PropValue::Text(s) => s.is_empty(),
            PropValue::Bool(b) => !b,
            _ => false,
        }
    }
}

impl PartialEq for PropValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PropValue::Text(a), PropValue::Text(b)) => a == b,
            (PropValue::Bool(a), PropValue::Bool(b)) => a == b,
            (PropValue::Number(a), PropValue::Number(b)) => a == b,
            (PropValue::Style(a), PropValue::Style(b)) => a == b,
            (PropValue::Handler(a), PropValue::Handler(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl std::fmt::Debug for PropValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropValue::Text(s) => write!(f, "{s:?}"),
            PropValue::Bool(b) => write!(f, "{b}"),
            PropValue::Number(n) => write!(f, "{n}"),
            PropValue::Style(s) => write!(f, "{s:?}"),
            PropValue::Handler(_) => write!(f, "<handler>"),
        }
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        PropValue::Text(s.to_string())
    }
}
impl From<String> for PropValue {
    fn from(s: String) -> Self {
        PropValue::Text(s)
    }
}
impl From<bool> for PropValue {
    fn from(b: bool) -> Self {
        PropValue::Bool(b)
    }
}
impl From<f64> for PropValue {
    fn from(n: f64) -> Self {
        PropValue::Number(n)
    }
}
impl From<i32> for PropValue {
    fn from(n: i32) -> Self {
        PropValue::Number(n as f64)
    }
}
impl From<Style> for PropValue {
    fn from(s: Style) -> Self {
        PropValue::Style(s)
    }
}

/// Declared properties of an element.
#[derive(Clone, Default)]
pub struct Props {
    values: BTreeMap<String, PropValue>,
    node_ref: Option<NodeRef>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr(CLASS, class.into())
    }

    pub fn style(self, style: Style) -> Self {
        self.attr(STYLE, style)
    }

    pub fn on(self, name: impl Into<String>, f: impl Fn(&Event) + 'static) -> Self {
        self.handler(name, Rc::new(f))
    }

    pub fn handler(self, name: impl Into<String>, h: EventHandler) -> Self {
        self.attr(name, PropValue::Handler(h))
    }

    pub fn node_ref(mut self, r: NodeRef) -> Self {
        self.node_ref = Some(r);
        self
    }

    /// Sets `name` only when it is not declared yet.
    pub fn or_insert(mut self, name: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.values.entry(name.into()).or_insert_with(|| value.into());
        self
    }

    /// `self` with every property of `over` written on top; `over`'s ref, if
    /// any, replaces this one.
    pub fn overlay(mut self, over: Props) -> Props {
        let (values, node_ref) = over.into_parts();
        self.values.extend(values);
        if node_ref.is_some() {
            self.node_ref = node_ref;
        }
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<PropValue>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&PropValue> {
        self.values.get(name)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(PropValue::as_text)
    }

    pub fn get_class(&self) -> Option<&str> {
        self.text(CLASS)
    }

    pub fn get_style(&self) -> Option<&Style> {
        match self.get(STYLE) {
            Some(PropValue::Style(s)) => Some(s),
            _ => None,
        }
    }

    pub fn get_handler(&self, name: &str) -> Option<EventHandler> {
        self.get(name).and_then(PropValue::as_handler).cloned()
    }

    pub fn get_node_ref(&self) -> Option<&NodeRef> {
        self.node_ref.as_ref()
    }

    pub fn remove(&mut self, name: &str) -> Option<PropValue> {
        self.values.remove(name)
    }

    pub fn take_node_ref(&mut self) -> Option<NodeRef> {
        self.node_ref.take()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.node_ref.is_none()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub(crate) fn into_parts(self) -> (BTreeMap<String, PropValue>, Option<NodeRef>) {
        (self.values, self.node_ref)
    }

    pub(crate) fn from_parts(values: BTreeMap<String, PropValue>, node_ref: Option<NodeRef>) -> Self {
        Self { values, node_ref }
    }
}

impl std::fmt::Debug for Props {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut m = f.debug_map();
        m.entries(self.values.iter());
        if self.node_ref.is_some() {
            m.entry(&"ref", &"<ref>");
        }
        m.finish()
    }
}

#[derive(Clone, Debug)]
pub struct Element {
    tag: String,
    props: Props,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            props: Props::default(),
            children: vec![],
        }
    }

    pub fn props(mut self, props: Props) -> Self {
        self.props = props;
        self
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_children(mut self, kids: Vec<Node>) -> Self {
        self.children = kids;
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn get_props(&self) -> &Props {
        &self.props
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn into_parts(self) -> (String, Props, Vec<Node>) {
        (self.tag, self.props, self.children)
    }
}

/// Content rendered into a host container instead of in place.
#[derive(Clone, Debug)]
pub struct PortalNode {
    pub container: String,
    pub child: Box<Node>,
}

#[derive(Clone, Debug)]
pub enum Node {
    /// Renders nothing; dropped wherever children are counted.
    Empty,
    Element(Element),
    Text(String),
    /// Marks where a slotted wrapper's other children go inside the child it
    /// renders as.
    Slottable(Vec<Node>),
    Portal(PortalNode),
}

impl Node {
    pub fn text(s: impl Into<String>) -> Self {
        Node::Text(s.into())
    }

    pub fn slottable(children: Vec<Node>) -> Self {
        Node::Slottable(children)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Node::Empty)
    }

    pub fn is_slottable(&self) -> bool {
        matches!(self, Node::Slottable(_))
    }

    /// HTML-ish rendering; handlers and refs are omitted, portals render
    /// nothing in place.
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        write_node(&mut out, self);
        out
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}
impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::Text(s.to_string())
    }
}
impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::Text(s)
    }
}

pub fn markup_of(nodes: &[Node]) -> String {
    let mut out = String::new();
    for n in nodes {
        write_node(&mut out, n);
    }
    out
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Text(t) => out.push_str(&escape(t)),
        Node::Slottable(children) => {
            for c in children {
                write_node(out, c);
            }
        }
        Node::Empty | Node::Portal(_) => {}
        Node::Element(el) => {
            let _ = write!(out, "<{}", el.tag);
            for (name, value) in el.props.iter() {
                match value {
                    PropValue::Text(s) => {
                        let _ = write!(out, " {name}=\"{}\"", escape(s));
                    }
                    PropValue::Bool(true) => {
                        let _ = write!(out, " {name}");
                    }
                    PropValue::Bool(false) | PropValue::Handler(_) => {}
                    PropValue::Number(n) => {
                        let _ = write!(out, " {name}=\"{}\"", format_number(*n));
                    }
                    PropValue::Style(s) if s.is_empty() => {}
                    PropValue::Style(s) => {
                        let _ = write!(out, " {name}=\"{}\"", escape(&s.to_css()));
                    }
                }
            }
            out.push('>');
            for c in &el.children {
                write_node(out, c);
            }
            let _ = write!(out, "</{}>", el.tag);
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
