//! Rendering a wrapper "as" its single child.
//!
//! A slotted wrapper hands its properties to the one element it is given and
//! renders that element instead of one of its own. When the wrapper also has
//! its own decorations (icons around a label, say) the caller marks where the
//! real child sits with [`Node::Slottable`]; the element inside the marker
//! becomes the rendered root and every sibling of the marker is moved inside
//! it, with the marker replaced by the element's own children.
//!
//! Property merge, per name present on the child:
//!
//! - handlers (`onClick`, ...) run wrapper first, then child; a falsy child
//!   value keeps the wrapper's handler;
//! - `style` is shallow merged, child keys win;
//! - `class` is concatenated, wrapper first;
//! - refs are composed so both sinks see the committed element;
//! - anything else: the child wins.

use crate::element::{CLASS, Element, Node, PropValue, Props, STYLE};
use crate::error::StructuralViolation;
use crate::event::{chain_handlers, is_handler_name};
use crate::refs::compose_refs;

/// Merges `slot` (wrapper) properties with `child` properties.
pub fn merge_props(slot: Props, child: Props) -> Props {
    let (mut merged, slot_ref) = slot.into_parts();
    let (child_values, child_ref) = child.into_parts();

    for (name, child_value) in child_values {
        let slot_value = merged.remove(&name);
        let value = match (slot_value, child_value) {
            (Some(PropValue::Handler(first)), PropValue::Handler(second))
                if is_handler_name(&name) =>
            {
                PropValue::Handler(chain_handlers(first, second))
            }
            (Some(PropValue::Handler(first)), child_value)
                if is_handler_name(&name) && child_value.is_falsy() =>
            {
                PropValue::Handler(first)
            }
            (Some(PropValue::Style(base)), PropValue::Style(over)) if name == STYLE => {
                PropValue::Style(base.merged(&over))
            }
            (slot_value, child_value) if name == CLASS => {
                join_classes(slot_value.as_ref(), Some(&child_value))
            }
            (_, child_value) => child_value,
        };
        merged.insert(name, value);
    }

    let node_ref = match (slot_ref, child_ref) {
        (Some(s), Some(c)) => Some(compose_refs([s, c])),
        (s, c) => s.or(c),
    };
    Props::from_parts(merged, node_ref)
}

fn join_classes(a: Option<&PropValue>, b: Option<&PropValue>) -> PropValue {
    let joined = [a, b]
        .into_iter()
        .flatten()
        .filter(|v| !v.is_falsy())
        .filter_map(PropValue::as_text)
        .collect::<Vec<_>>()
        .join(" ");
    PropValue::Text(joined)
}

/// Resolves `children` to the single element `props` should be merged onto.
///
/// `Ok(None)` means there is nothing to render (no child, or the child is not
/// an element). Multiplicities beyond one are reported, never rendered.
pub fn merge_into_single_child(
    props: Props,
    mut children: Vec<Node>,
) -> Result<Option<Element>, StructuralViolation> {
    children.retain(|c| !c.is_empty());
    let Some(pos) = children.iter().position(Node::is_slottable) else {
        if children.len() > 1 {
            return Err(StructuralViolation::MultipleChildren {
                count: children.len(),
            });
        }
        return Ok(match children.pop() {
            Some(Node::Element(el)) => Some(clone_with(props, el, None)),
            _ => None,
        });
    };

    let Node::Slottable(mut content) = children.remove(pos) else {
        unreachable!("position() matched a Slottable");
    };
    content.retain(|c| !c.is_empty());
    if content.len() > 1 {
        return Err(StructuralViolation::MultipleForwarded {
            count: content.len(),
        });
    }
    let Some(Node::Element(target)) = content.pop() else {
        return Ok(None);
    };

    let (tag, target_props, own_children) = target.into_parts();
    children.splice(pos..pos, own_children);
    let target = Element::new(tag).props(target_props);
    Ok(Some(clone_with(props, target, Some(children))))
}

fn clone_with(props: Props, el: Element, children: Option<Vec<Node>>) -> Element {
    let (tag, child_props, own_children) = el.into_parts();
    Element::new(tag)
        .props(merge_props(props, child_props))
        .with_children(children.unwrap_or(own_children))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Style, markup_of};
    use crate::event::Event;
    use crate::handle::ElementHandle;
    use crate::refs::ElementRef;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn button(label: &str) -> Node {
        Element::new("button").child(label).into()
    }

    #[test]
    fn test_merge_handlers_class_and_style() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let (f, g) = (calls.clone(), calls.clone());
        let slot = Props::new()
            .on("onClick", move |_| f.borrow_mut().push("f"))
            .class("a")
            .style(Style::new().set("color", "red"));
        let child = Props::new()
            .on("onClick", move |_| g.borrow_mut().push("g"))
            .class("b")
            .style(Style::new().set("margin", 1));

        let merged = merge_props(slot, child);
        merged.get_handler("onClick").unwrap()(&Event::click(1));

        assert_eq!(*calls.borrow(), vec!["f", "g"]);
        assert_eq!(merged.get_class(), Some("a b"));
        assert_eq!(
            merged.get_style(),
            Some(&Style::new().set("color", "red").set("margin", 1))
        );
    }

    #[test]
    fn test_merged_handler_ignores_default_prevented() {
        let calls = Rc::new(RefCell::new(0));
        let c = calls.clone();
        let slot = Props::new().on("onClick", |ev| ev.prevent_default());
        let child = Props::new().on("onClick", move |_| *c.borrow_mut() += 1);
        merge_props(slot, child).get_handler("onClick").unwrap()(&Event::click(1));
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn test_falsy_child_handler_keeps_wrapper_handler() {
        let calls = Rc::new(RefCell::new(0));
        let c = calls.clone();
        let slot = Props::new().on("onClick", move |_| *c.borrow_mut() += 1);
        let merged = merge_props(slot, Props::new().attr("onClick", false));
        merged.get_handler("onClick").unwrap()(&Event::click(1));
        assert_eq!(*calls.borrow(), 1);

        // Only handler names are protected.
        let merged = merge_props(Props::new().attr("title", "a"), Props::new().attr("title", ""));
        assert_eq!(merged.text("title"), Some(""));
    }

    #[test]
    fn test_child_wins_for_plain_props() {
        let slot = Props::new().attr("type", "button").attr("id", "slot");
        let child = Props::new().attr("id", "child").class("");
        let merged = merge_props(slot, child);
        assert_eq!(merged.text("id"), Some("child"));
        assert_eq!(merged.text("type"), Some("button"));
        assert_eq!(merged.get_class(), Some(""));
    }

    #[test]
    fn test_style_child_keys_win() {
        let slot = Props::new().style(Style::new().set("color", "red").set("top", 0));
        let child = Props::new().style(Style::new().set("color", "blue"));
        let merged = merge_props(slot, child);
        assert_eq!(merged.get_style().unwrap().get("color"), Some("blue"));
        assert_eq!(merged.get_style().unwrap().get("top"), Some("0"));
    }

    #[test]
    fn test_refs_are_composed() {
        let outer = ElementRef::new();
        let inner = ElementRef::new();
        let merged = merge_props(
            Props::new().node_ref(outer.sink()),
            Props::new().node_ref(inner.sink()),
        );
        let el = ElementHandle::new("a");
        merged.get_node_ref().unwrap().attach(&el);
        assert_eq!(outer.get(), Some(el.clone()));
        assert_eq!(inner.get(), Some(el));
    }

    #[test]
    fn test_single_child_is_cloned_with_props() {
        let out = merge_into_single_child(Props::new().class("x"), vec![button("Go")])
            .unwrap()
            .unwrap();
        assert_eq!(out.tag(), "button");
        assert_eq!(Node::from(out).to_markup(), r#"<button class="x">Go</button>"#);
    }

    #[test]
    fn test_no_child_or_text_child_renders_nothing() {
        assert!(merge_into_single_child(Props::new(), vec![]).unwrap().is_none());
        assert!(
            merge_into_single_child(Props::new(), vec!["text".into()])
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_two_children_without_marker_is_violation() {
        let err = merge_into_single_child(Props::new(), vec![button("a"), button("b")]);
        assert_eq!(
            err.unwrap_err(),
            StructuralViolation::MultipleChildren { count: 2 }
        );
    }

    #[test]
    fn test_marker_with_two_children_is_violation() {
        let children = vec![
            Element::new("span").child("left").into(),
            Node::slottable(vec![button("a"), button("b")]),
        ];
        let err = merge_into_single_child(Props::new(), children);
        assert_eq!(
            err.unwrap_err(),
            StructuralViolation::MultipleForwarded { count: 2 }
        );
    }

    #[test]
    fn test_marker_is_unwrapped_in_place() {
        let link = Element::new("a")
            .props(Props::new().attr("href", "/"))
            .child("Button ")
            .child(Element::new("em").child("text"));
        let children = vec![
            Element::new("span").child("left").into(),
            Node::slottable(vec![link.into()]),
            Element::new("span").child("right").into(),
        ];
        let out = merge_into_single_child(Props::new().attr("type", "button"), children)
            .unwrap()
            .unwrap();
        assert_eq!(
            markup_of(&[out.into()]),
            r#"<a href="/" type="button"><span>left</span>Button <em>text</em><span>right</span></a>"#
        );
    }

    #[test]
    fn test_empty_children_are_not_counted() {
        let out = merge_into_single_child(
            Props::new(),
            vec![Node::Empty, button("Go"), Node::Empty],
        )
        .unwrap();
        assert_eq!(out.unwrap().tag(), "button");

        let children = vec![Node::slottable(vec![Node::Empty, button("Go")])];
        assert!(merge_into_single_child(Props::new(), children).unwrap().is_some());
    }

    #[test]
    fn test_marker_with_text_renders_nothing() {
        let children = vec![Node::slottable(vec!["plain".into()])];
        assert!(merge_into_single_child(Props::new(), children).unwrap().is_none());
    }
}
