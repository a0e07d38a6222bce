//! # Sprig core
//!
//! Framework-agnostic pieces shared by every Sprig widget:
//!
//! - [`context`]: contexts scoped per widget instance, so two dialogs (or a
//!   dialog inside a dialog) never see each other's wiring.
//! - [`slot`]: render a wrapper *as* its single child, merging handlers,
//!   classes, styles and refs instead of overwriting them.
//! - [`presence`]: decide when an element that was told to disappear may
//!   actually be removed, waiting for its exit animation.
//!
//! They operate on a small element model ([`Node`], [`Element`], [`Props`])
//! and on [`ElementHandle`]s, the host's identity for a committed element.
//!
//! ## Slots
//!
//! ```rust
//! use sprig_core::*;
//!
//! let child: Node = Element::new("a")
//!     .props(Props::new().attr("href", "/").class("link"))
//!     .child("Home")
//!     .into();
//!
//! let merged = merge_into_single_child(Props::new().class("button"), vec![child])
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(merged.get_props().get_class(), Some("button link"));
//! ```
//!
//! ## Remembered state
//!
//! Widgets keep per-instance state (an open flag, a presence machine, a
//! scope) in `remember*` slots. Slots are order-based: the Nth `remember` call
//! in a frame always refers to the Nth stored value, so a widget must call
//! them unconditionally. `remember_with_key` is stable across conditional
//! branches.
//!
//! ```rust
//! use sprig_core::*;
//!
//! let frame = || remember_state(|| 0);
//! let first = compose(frame);
//! *first.borrow_mut() += 1;
//! let second = compose(frame);
//! assert_eq!(*second.borrow(), 1);
//! ```

pub mod context;
pub mod element;
pub mod error;
pub mod event;
pub mod handle;
pub mod prelude;
pub mod presence;
pub mod refs;
pub mod runtime;
pub mod slot;
pub mod tests;

pub use context::*;
pub use element::*;
pub use error::*;
pub use event::*;
pub use handle::*;
pub use presence::*;
pub use refs::*;
pub use runtime::*;
pub use slot::*;
