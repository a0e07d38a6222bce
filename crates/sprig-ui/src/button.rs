use sprig_core::{Element, Node, Props};

use crate::{Slot, Slottable};

#[derive(Clone, Debug, Default)]
pub struct ButtonProps {
    /// Render as the single child element instead of a `button`.
    pub as_child: bool,
    pub icon_left: Option<Node>,
    pub icon_right: Option<Node>,
    pub disabled: bool,
    pub props: Props,
}

pub fn Button(p: ButtonProps, children: Vec<Node>) -> Node {
    let mut props = p.props;
    if p.disabled {
        props.set("disabled", true);
    }

    let mut kids = Vec::with_capacity(3);
    kids.extend(p.icon_left);
    kids.push(Slottable(children));
    kids.extend(p.icon_right);

    if p.as_child {
        Slot(props, kids)
    } else {
        Element::new("button").props(props).with_children(kids).into()
    }
}
