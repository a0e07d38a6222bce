//! Dialog: a root holding the open state and parts that read it.
//!
//! Parts find their root through contexts of the `Dialog` scope namespace.
//! Parts called with `None` bind to the nearest `Dialog` called with `None`;
//! a widget built on top of a dialog passes its own [`Scope`] (from
//! [`create_dialog_scope`]) to every part so it never picks up an enclosing
//! dialog's state.
//!
//! ```rust
//! use sprig_core::*;
//! use sprig_ui::*;
//!
//! let mut host = Host::new();
//! let ui = || {
//!     Dialog(None, DialogProps::default(), || {
//!         let mut nodes = vec![DialogTrigger(None, Props::new(), vec!["Open".into()])];
//!         nodes.extend(DialogPortal(None, DialogPortalProps::default(), || {
//!             vec![DialogContent(None, Props::new(), None, vec!["Hello".into()])]
//!         }));
//!         nodes
//!     })
//! };
//! host.render(ui);
//! let trigger = host.find_by_tag("button").unwrap();
//! host.click(&trigger);
//! host.render(ui);
//! assert!(host.container_markup("body").contains("Hello"));
//! ```

use std::rc::Rc;

use sprig_core::*;

use crate::error::expect_context;
use crate::id::use_id;
use crate::portal::teleport;
use crate::presence::Presence;
use crate::state::{ChangeCallback, use_controllable_state};

const DIALOG_NAME: &str = "Dialog";
const TRIGGER_NAME: &str = "DialogTrigger";
const PORTAL_NAME: &str = "DialogPortal";
const OVERLAY_NAME: &str = "DialogOverlay";
const CONTENT_NAME: &str = "DialogContent";
const TITLE_NAME: &str = "DialogTitle";
const DESCRIPTION_NAME: &str = "DialogDescription";
const CLOSE_NAME: &str = "DialogClose";

/// What every dialog part learns from its root.
#[derive(Clone)]
pub struct DialogContextValue {
    pub content_id: String,
    pub title_id: String,
    pub description_id: String,
    pub modal: bool,
    pub open: bool,
    pub on_open_change: Rc<dyn Fn(bool)>,
    pub on_open_toggle: Rc<dyn Fn()>,
    pub trigger_ref: ElementRef,
    pub content_ref: ElementRef,
}

#[derive(Clone, Debug, Default)]
struct PortalContextValue {
    force_mount: bool,
}

struct DialogContexts {
    factory: ScopeFactory,
    dialog: ContextSlot<DialogContextValue>,
    portal: ContextSlot<PortalContextValue>,
}

impl DialogContexts {
    fn define() -> Self {
        let mut ns = create_scope_namespace(DIALOG_NAME);
        let dialog = ns.define_context(DIALOG_NAME, None);
        let portal = ns.define_context(PORTAL_NAME, Some(PortalContextValue::default()));
        Self {
            factory: ns.finish(),
            dialog,
            portal,
        }
    }
}

thread_local! {
    static CONTEXTS: DialogContexts = DialogContexts::define();
}

/// Scope factory of the dialog namespace, for widgets composed from a dialog.
pub fn create_dialog_scope() -> ScopeFactory {
    CONTEXTS.with(|c| c.factory.clone())
}

fn dialog_slot() -> ContextSlot<DialogContextValue> {
    CONTEXTS.with(|c| c.dialog.clone())
}

fn portal_slot() -> ContextSlot<PortalContextValue> {
    CONTEXTS.with(|c| c.portal.clone())
}

fn use_dialog_context(scope: Option<&Scope>, consumer: &str) -> DialogContextValue {
    expect_context(dialog_slot().read(scope, consumer))
}

fn open_state(open: bool) -> &'static str {
    if open { "open" } else { "closed" }
}

#[derive(Clone)]
pub struct DialogProps {
    /// Controlled open state; `None` leaves it to the dialog.
    pub open: Option<bool>,
    pub default_open: bool,
    pub modal: bool,
    pub on_open_change: Option<ChangeCallback<bool>>,
}

impl Default for DialogProps {
    fn default() -> Self {
        Self {
            open: None,
            default_open: false,
            modal: true,
            on_open_change: None,
        }
    }
}

/// Root of a dialog. `children` is built with the dialog state provided.
pub fn Dialog<R>(scope: Option<&Scope>, props: DialogProps, children: impl FnOnce() -> R) -> R {
    let trigger_ref = remember(ElementRef::new);
    let content_ref = remember(ElementRef::new);
    let (open, set_open) =
        use_controllable_state(props.open, props.default_open, props.on_open_change);
    let content_id = use_id(None);
    let title_id = use_id(None);
    let description_id = use_id(None);

    let on_open_change: Rc<dyn Fn(bool)> = {
        let set_open = set_open.clone();
        Rc::new(move |open: bool| set_open.set(open))
    };
    let on_open_toggle: Rc<dyn Fn()> = Rc::new(move || set_open.update(|open| !open));

    let value = DialogContextValue {
        content_id,
        title_id,
        description_id,
        modal: props.modal,
        open,
        on_open_change,
        on_open_toggle,
        trigger_ref: (*trigger_ref).clone(),
        content_ref: (*content_ref).clone(),
    };
    dialog_slot().provide(scope, value, children)
}

/// Button toggling the dialog.
pub fn DialogTrigger(scope: Option<&Scope>, props: Props, children: Vec<Node>) -> Node {
    let ctx = use_dialog_context(scope, TRIGGER_NAME);
    let mut props = props;
    let on_click = props.get_handler("onClick");
    let user_ref = props.take_node_ref();

    let toggle = ctx.on_open_toggle.clone();
    let on_click = compose_event_handlers(on_click, Some(Rc::new(move |_: &Event| toggle())));
    let node_ref = compose_refs(user_ref.into_iter().chain([ctx.trigger_ref.sink()]));

    let props = Props::new()
        .attr("type", "button")
        .attr("aria-haspopup", "dialog")
        .attr("aria-expanded", if ctx.open { "true" } else { "false" })
        .attr("aria-controls", ctx.content_id.clone())
        .attr("data-state", open_state(ctx.open))
        .overlay(props)
        .handler("onClick", on_click)
        .node_ref(node_ref);
    Element::new("button").props(props).with_children(children).into()
}

#[derive(Clone, Debug, Default)]
pub struct DialogPortalProps {
    /// Host container; `body` when unset.
    pub container: Option<String>,
    /// Keep the children mounted while closed.
    pub force_mount: bool,
}

/// Renders every child into the portal container while the dialog is open.
pub fn DialogPortal(
    scope: Option<&Scope>,
    props: DialogPortalProps,
    children: impl FnOnce() -> Vec<Node>,
) -> Vec<Node> {
    let ctx = use_dialog_context(scope, PORTAL_NAME);
    let present = props.force_mount || ctx.open;
    let value = PortalContextValue {
        force_mount: props.force_mount,
    };
    portal_slot().provide(scope, value, || {
        children()
            .into_iter()
            .map(|child| Presence(present, teleport(props.container.as_deref(), child)))
            .collect()
    })
}

/// Backdrop behind modal content. Renders nothing for non-modal dialogs.
pub fn DialogOverlay(scope: Option<&Scope>, props: Props, force_mount: Option<bool>) -> Node {
    let portal = expect_context(portal_slot().read(scope, OVERLAY_NAME));
    let force_mount = force_mount.unwrap_or(portal.force_mount);
    let ctx = use_dialog_context(scope, OVERLAY_NAME);
    if !ctx.modal {
        return Node::Empty;
    }

    let base_style = Style::new().set("pointer-events", "all");
    let style = match props.get_style() {
        Some(user) => base_style.merged(user),
        None => base_style,
    };
    let props = Props::new()
        .attr("data-state", open_state(ctx.open))
        .overlay(props)
        .style(style);
    Presence(
        force_mount || ctx.open,
        Element::new("div").props(props).into(),
    )
}

/// The dialog surface.
pub fn DialogContent(
    scope: Option<&Scope>,
    props: Props,
    force_mount: Option<bool>,
    children: Vec<Node>,
) -> Node {
    let portal = expect_context(portal_slot().read(scope, CONTENT_NAME));
    let force_mount = force_mount.unwrap_or(portal.force_mount);
    let ctx = use_dialog_context(scope, CONTENT_NAME);

    let mut props = props;
    let user_ref = props.take_node_ref();
    let node_ref = compose_refs(user_ref.into_iter().chain([ctx.content_ref.sink()]));
    let props = Props::new()
        .attr("role", "dialog")
        .attr("id", ctx.content_id.clone())
        .attr("aria-labelledby", ctx.title_id.clone())
        .attr("aria-describedby", ctx.description_id.clone())
        .attr("data-state", open_state(ctx.open))
        .overlay(props)
        .node_ref(node_ref);
    Presence(
        force_mount || ctx.open,
        Element::new("div").props(props).with_children(children).into(),
    )
}

pub fn DialogTitle(scope: Option<&Scope>, props: Props, children: Vec<Node>) -> Node {
    let ctx = use_dialog_context(scope, TITLE_NAME);
    let props = Props::new().attr("id", ctx.title_id).overlay(props);
    Element::new("h2").props(props).with_children(children).into()
}

pub fn DialogDescription(scope: Option<&Scope>, props: Props, children: Vec<Node>) -> Node {
    let ctx = use_dialog_context(scope, DESCRIPTION_NAME);
    let props = Props::new().attr("id", ctx.description_id).overlay(props);
    Element::new("p").props(props).with_children(children).into()
}

/// Button closing the dialog.
pub fn DialogClose(scope: Option<&Scope>, props: Props, children: Vec<Node>) -> Node {
    let ctx = use_dialog_context(scope, CLOSE_NAME);
    let on_click = props.get_handler("onClick");
    let close = ctx.on_open_change.clone();
    let on_click = compose_event_handlers(on_click, Some(Rc::new(move |_: &Event| close(false))));
    let props = Props::new()
        .attr("type", "button")
        .overlay(props)
        .handler("onClick", on_click);
    Element::new("button").props(props).with_children(children).into()
}
