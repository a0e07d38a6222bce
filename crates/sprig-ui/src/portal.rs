use sprig_core::{Element, Node, PortalNode, Props};

/// Container used when a portal names none.
pub const DEFAULT_PORTAL_CONTAINER: &str = "body";

/// Renders `child` into a host container instead of in place.
pub fn teleport(container: Option<&str>, child: Node) -> Node {
    Node::Portal(PortalNode {
        container: container.unwrap_or(DEFAULT_PORTAL_CONTAINER).to_string(),
        child: Box::new(child),
    })
}

/// A `div` holding `children`, rendered into `container` (default `body`).
pub fn Portal(container: Option<&str>, props: Props, children: Vec<Node>) -> Node {
    teleport(
        container,
        Element::new("div").props(props).with_children(children).into(),
    )
}
