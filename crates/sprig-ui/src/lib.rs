#![allow(non_snake_case)]
//! Widgets built on `sprig-core`: dialog, button, heading, portal, presence,
//! plus a small in-memory [`Host`] that commits node trees and delivers
//! events to them.
//!
//! Widgets are plain functions returning [`Node`]s. Per-instance state lives
//! in `remember` slots, so every widget must be called unconditionally within
//! a frame; run frames with [`Host::render`] (or `sprig_core::compose`).
//!
//! ```rust
//! use sprig_core::*;
//! use sprig_ui::*;
//!
//! let mut host = Host::new();
//! host.render(|| {
//!     vec![Button(
//!         ButtonProps { as_child: true, ..Default::default() },
//!         vec![Element::new("a").props(Props::new().attr("href", "/")).child("Home").into()],
//!     )]
//! });
//! assert_eq!(host.markup(), r#"<a href="/">Home</a>"#);
//! ```

pub mod button;
pub mod dialog;
pub mod error;
pub mod heading;
pub mod host;
pub mod id;
pub mod portal;
pub mod presence;
pub mod state;

pub use button::*;
pub use dialog::*;
pub use error::*;
pub use heading::*;
pub use host::*;
pub use id::*;
pub use portal::*;
pub use presence::*;
pub use state::*;

use sprig_core::*;

/// Renders `children`' single element in place of a wrapper, carrying
/// `props` onto it. See [`sprig_core::slot`] for the merge rules.
///
/// Raises a [`StructuralViolation`] when given more than one child.
pub fn Slot(props: Props, children: Vec<Node>) -> Node {
    match merge_into_single_child(props, children) {
        Ok(Some(el)) => el.into(),
        Ok(None) => Node::Empty,
        Err(violation) => raise(violation),
    }
}

/// Marks which of a [`Slot`]'s children is the element to render as.
pub fn Slottable(children: Vec<Node>) -> Node {
    Node::slottable(children)
}

/// Space separated class list without empty entries.
pub fn cn<'a>(classes: impl IntoIterator<Item = &'a str>) -> String {
    classes
        .into_iter()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
