//! Events delivered by the host and the helpers that chain their handlers.

use std::cell::Cell;
use std::rc::Rc;

use crate::handle::ElementId;

pub type EventHandler = Rc<dyn Fn(&Event)>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EventKind {
    Click,
    AnimationStart,
    AnimationEnd,
    AnimationCancel,
    Custom(String),
}

impl EventKind {
    /// Property name a handler for this event is registered under.
    pub fn handler_name(&self) -> String {
        match self {
            EventKind::Click => "onClick".to_string(),
            EventKind::AnimationStart => "onAnimationStart".to_string(),
            EventKind::AnimationEnd => "onAnimationEnd".to_string(),
            EventKind::AnimationCancel => "onAnimationCancel".to_string(),
            EventKind::Custom(name) => {
                let mut chars = name.chars();
                match chars.next() {
                    Some(first) => format!("on{}{}", first.to_ascii_uppercase(), chars.as_str()),
                    None => "on".to_string(),
                }
            }
        }
    }
}

#[derive(Debug)]
pub struct Event {
    kind: EventKind,
    target: Option<ElementId>,
    animation_name: Option<String>,
    default_prevented: Cell<bool>,
}

impl Event {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            target: None,
            animation_name: None,
            default_prevented: Cell::new(false),
        }
    }

    pub fn click(target: ElementId) -> Self {
        Self::new(EventKind::Click).with_target(target)
    }

    /// An animation lifecycle event for `animation_name` on `target`.
    pub fn animation(kind: EventKind, target: ElementId, animation_name: impl Into<String>) -> Self {
        let mut ev = Self::new(kind).with_target(target);
        ev.animation_name = Some(animation_name.into());
        ev
    }

    pub fn with_target(mut self, target: ElementId) -> Self {
        self.target = Some(target);
        self
    }

    pub fn kind(&self) -> &EventKind {
        &self.kind
    }

    pub fn target(&self) -> Option<ElementId> {
        self.target
    }

    pub fn animation_name(&self) -> Option<&str> {
        self.animation_name.as_deref()
    }

    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ComposeOptions {
    /// Skip the additional handler once the original prevented the default.
    pub check_for_default_prevented: bool,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            check_for_default_prevented: true,
        }
    }
}

/// Runs `original`, then `additional` unless the event's default was prevented.
pub fn compose_event_handlers(
    original: Option<EventHandler>,
    additional: Option<EventHandler>,
) -> EventHandler {
    compose_event_handlers_with(original, additional, ComposeOptions::default())
}

pub fn compose_event_handlers_with(
    original: Option<EventHandler>,
    additional: Option<EventHandler>,
    options: ComposeOptions,
) -> EventHandler {
    Rc::new(move |event: &Event| {
        if let Some(original) = &original {
            original(event);
        }
        if !options.check_for_default_prevented || !event.is_default_prevented() {
            if let Some(additional) = &additional {
                additional(event);
            }
        }
    })
}

/// Both handlers always run, `first` before `second`.
pub(crate) fn chain_handlers(first: EventHandler, second: EventHandler) -> EventHandler {
    Rc::new(move |event: &Event| {
        first(event);
        second(event);
    })
}

/// `onClick`, `onAnimationEnd`, ... : `on` followed by an uppercase letter.
pub fn is_handler_name(name: &str) -> bool {
    name.strip_prefix("on")
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn recorder(log: &Rc<RefCell<Vec<&'static str>>>, tag: &'static str) -> EventHandler {
        let log = log.clone();
        Rc::new(move |_| log.borrow_mut().push(tag))
    }

    #[test]
    fn test_compose_runs_both_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let h = compose_event_handlers(Some(recorder(&log, "a")), Some(recorder(&log, "b")));
        h(&Event::click(1));
        assert_eq!(*log.borrow(), vec!["a", "b"]);
    }

    #[test]
    fn test_compose_stops_when_default_prevented() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let preventing: EventHandler = Rc::new(|ev| ev.prevent_default());
        let h = compose_event_handlers(Some(preventing.clone()), Some(recorder(&log, "b")));
        h(&Event::click(1));
        assert!(log.borrow().is_empty());

        let h = compose_event_handlers_with(
            Some(preventing),
            Some(recorder(&log, "b")),
            ComposeOptions {
                check_for_default_prevented: false,
            },
        );
        h(&Event::click(1));
        assert_eq!(*log.borrow(), vec!["b"]);
    }

    #[test]
    fn test_compose_with_missing_sides() {
        let log = Rc::new(RefCell::new(Vec::new()));
        compose_event_handlers(None, Some(recorder(&log, "b")))(&Event::click(1));
        compose_event_handlers(Some(recorder(&log, "a")), None)(&Event::click(1));
        compose_event_handlers(None, None)(&Event::click(1));
        assert_eq!(*log.borrow(), vec!["b", "a"]);
    }

    #[test]
    fn test_handler_names() {
        assert!(is_handler_name("onClick"));
        assert!(is_handler_name("onAnimationEnd"));
        assert!(!is_handler_name("online"));
        assert!(!is_handler_name("on"));
        assert!(!is_handler_name("class"));
        assert_eq!(
            EventKind::Custom("keyDown".into()).handler_name(),
            "onKeyDown"
        );
    }
}
