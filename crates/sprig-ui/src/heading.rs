use sprig_core::{Element, Node, Props};

use crate::cn;

const HEADING_CLASS: &str = "text-3xl font-semi";
const SUBTITLE_CLASS: &str = "text-muted-foreground";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HeadingLevel {
    #[default]
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingLevel {
    pub fn tag(self) -> &'static str {
        match self {
            HeadingLevel::H1 => "h1",
            HeadingLevel::H2 => "h2",
            HeadingLevel::H3 => "h3",
            HeadingLevel::H4 => "h4",
            HeadingLevel::H5 => "h5",
            HeadingLevel::H6 => "h6",
        }
    }
}

/// `h1`..`h6`; the caller's class is appended to the base classes.
pub fn Heading(level: HeadingLevel, props: Props, children: Vec<Node>) -> Node {
    let class = cn([HEADING_CLASS, props.get_class().unwrap_or_default()]);
    let props = Props::new()
        .attr("aria-label", "Title")
        .overlay(props)
        .class(class);
    Element::new(level.tag())
        .props(props)
        .with_children(children)
        .into()
}

/// Secondary line under a heading. Caller props replace the defaults.
pub fn Subtitle(props: Props, children: Vec<Node>) -> Node {
    let props = props
        .or_insert("aria-label", "Subtitle")
        .or_insert("class", SUBTITLE_CLASS)
        .or_insert("role", "doc-subtitle");
    Element::new("p").props(props).with_children(children).into()
}

pub fn HeadingWrapper(props: Props, children: Vec<Node>) -> Node {
    Element::new("header").props(props).with_children(children).into()
}
