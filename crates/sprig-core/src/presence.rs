//! # Presence
//!
//! Keeps an element attached while its exit animation runs.
//!
//! Flipping `present` to `false` does not remove an element straight away:
//! if the element's computed animation name changed when it was told to
//! close, an exit animation is running and the machine waits in
//! [`PresenceState::UnmountSuspended`] for the matching `animationend` (or
//! `animationcancel`). Without an animation, or when the element is hidden,
//! it goes straight to [`PresenceState::Unmounted`].
//!
//! ```text
//!              ANIMATION_OUT                 ANIMATION_END
//!   Mounted ────────────────► UnmountSuspended ─────────────► Unmounted
//!     ▲  │                          │                            │
//!     │  └──────── UNMOUNT ─────────┼───────────────────────────►│
//!     │◄───────── MOUNT ────────────┘                            │
//!     └◄──────────────────────── MOUNT ──────────────────────────┘
//! ```
//!
//! Events with no arrow from the current state are ignored. That is how a
//! late `animationend` from an exit that was interrupted by a re-open gets
//! dropped: the machine is already back in `Mounted`.

use crate::event::{Event, EventKind};
use crate::handle::ElementHandle;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PresenceState {
    Mounted,
    UnmountSuspended,
    Unmounted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PresenceEvent {
    Mount,
    Unmount,
    AnimationOut,
    AnimationEnd,
}

impl PresenceState {
    pub fn transition(self, event: PresenceEvent) -> PresenceState {
        use PresenceEvent::*;
        use PresenceState::*;
        match (self, event) {
            (Mounted, AnimationOut) => UnmountSuspended,
            (Mounted, Unmount) => Unmounted,
            (Unmounted, Mount) => Mounted,
            (UnmountSuspended, AnimationEnd) => Unmounted,
            (UnmountSuspended, Mount) => Mounted,
            (state, _) => state,
        }
    }

    /// The element stays attached while mounted or finishing its exit.
    pub fn is_present(self) -> bool {
        matches!(self, PresenceState::Mounted | PresenceState::UnmountSuspended)
    }
}

const NO_ANIMATION: &str = "none";

/// Presence of one controlled element.
#[derive(Debug)]
pub struct PresenceMachine {
    state: PresenceState,
    was_present: bool,
    prev_animation_name: String,
    node: Option<ElementHandle>,
}

impl PresenceMachine {
    pub fn new(present: bool) -> Self {
        Self {
            state: if present {
                PresenceState::Mounted
            } else {
                PresenceState::Unmounted
            },
            was_present: present,
            prev_animation_name: NO_ANIMATION.to_string(),
            node: None,
        }
    }

    pub fn state(&self) -> PresenceState {
        self.state
    }

    pub fn is_present(&self) -> bool {
        self.state.is_present()
    }

    pub fn node(&self) -> Option<&ElementHandle> {
        self.node.as_ref()
    }

    /// Animation name captured at the last render.
    pub fn previous_animation_name(&self) -> &str {
        &self.prev_animation_name
    }

    pub fn send(&mut self, event: PresenceEvent) -> PresenceState {
        let next = self.state.transition(event);
        if next == self.state {
            log::trace!("presence: {event:?} ignored in {:?}", self.state);
            return next;
        }
        log::debug!("presence: {:?} --{event:?}--> {next:?}", self.state);
        self.state = next;
        self.capture_animation_name();
        next
    }

    fn current_animation_name(&self) -> String {
        self.node
            .as_ref()
            .map(ElementHandle::animation_name)
            .unwrap_or_else(|| NO_ANIMATION.to_string())
    }

    fn capture_animation_name(&mut self) {
        self.prev_animation_name = if self.state == PresenceState::Mounted {
            self.current_animation_name()
        } else {
            NO_ANIMATION.to_string()
        };
    }

    /// Reconciles the controlling boolean. Nothing happens unless it changed
    /// since the last call.
    pub fn set_present(&mut self, present: bool) {
        if present == self.was_present {
            return;
        }
        self.was_present = present;

        if present {
            self.send(PresenceEvent::Mount);
            return;
        }

        let current = self.current_animation_name();
        let hidden = self.node.as_ref().is_some_and(ElementHandle::is_hidden);
        if current == NO_ANIMATION || hidden {
            // Nothing can animate; skip the suspended state.
            self.send(PresenceEvent::Unmount);
        } else if current != self.prev_animation_name {
            self.send(PresenceEvent::AnimationOut);
        } else {
            self.send(PresenceEvent::Unmount);
        }
    }

    /// Points the machine at the element it controls.
    ///
    /// `Some` replaces the current element without touching the state.
    /// `None` means the element is gone for good: a pending exit can never
    /// finish, so the machine is released from `UnmountSuspended`.
    pub fn attach(&mut self, node: Option<ElementHandle>) {
        match node {
            Some(node) => {
                let first = self.node.is_none();
                self.node = Some(node);
                if first && self.state == PresenceState::Mounted {
                    self.capture_animation_name();
                }
            }
            None => {
                self.node = None;
                if self.state != PresenceState::Unmounted {
                    self.send(PresenceEvent::AnimationEnd);
                }
            }
        }
    }

    fn owns_target(&self, event: &Event) -> bool {
        match (&self.node, event.target()) {
            (Some(node), Some(target)) => node.id() == target,
            _ => false,
        }
    }

    pub fn handle_animation_start(&mut self, event: &Event) {
        if self.owns_target(event) {
            self.prev_animation_name = self.current_animation_name();
        }
    }

    /// `animationend` and `animationcancel`.
    pub fn handle_animation_end(&mut self, event: &Event) {
        let Some(name) = event.animation_name() else {
            return;
        };
        let current = self.current_animation_name();
        let is_current = current.split(',').any(|n| n.trim() == name);
        if self.owns_target(event) && is_current {
            self.send(PresenceEvent::AnimationEnd);
        } else {
            log::trace!("presence: stale end of `{name}` (current `{current}`)");
        }
    }

    pub fn handle_event(&mut self, event: &Event) {
        match event.kind() {
            EventKind::AnimationStart => self.handle_animation_start(event),
            EventKind::AnimationEnd | EventKind::AnimationCancel => self.handle_animation_end(event),
            _ => {}
        }
    }
}
