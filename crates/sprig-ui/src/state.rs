use std::cell::RefCell;
use std::rc::Rc;

use sprig_core::remember_state;

pub type ChangeCallback<T> = Rc<dyn Fn(T)>;

/// Writes a value that is either owned by the caller (controlled) or kept by
/// the widget (uncontrolled).
pub struct StateSetter<T: 'static> {
    store: Rc<RefCell<T>>,
    controlled: Option<T>,
    on_change: Option<ChangeCallback<T>>,
}

impl<T: Clone> Clone for StateSetter<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            controlled: self.controlled.clone(),
            on_change: self.on_change.clone(),
        }
    }
}

impl<T: Clone + PartialEq + 'static> StateSetter<T> {
    pub fn get(&self) -> T {
        match &self.controlled {
            Some(v) => v.clone(),
            None => self.store.borrow().clone(),
        }
    }

    /// Stores `next` when uncontrolled and reports it through the change
    /// callback. Setting the current value does nothing.
    pub fn set(&self, next: T) {
        if next == self.get() {
            return;
        }
        if self.controlled.is_none() {
            *self.store.borrow_mut() = next.clone();
        }
        if let Some(cb) = &self.on_change {
            cb(next);
        }
    }

    pub fn update(&self, f: impl FnOnce(&T) -> T) {
        let next = f(&self.get());
        self.set(next);
    }
}

/// Value of a prop that may be controlled by the caller.
///
/// With `prop` set the caller owns the value and only hears about requested
/// changes; otherwise `default` seeds state remembered by the widget.
pub fn use_controllable_state<T: Clone + PartialEq + 'static>(
    prop: Option<T>,
    default: T,
    on_change: Option<ChangeCallback<T>>,
) -> (T, StateSetter<T>) {
    let store = remember_state(|| default);
    let setter = StateSetter {
        store,
        controlled: prop,
        on_change,
    };
    (setter.get(), setter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprig_core::compose;

    #[test]
    fn test_uncontrolled_keeps_its_value() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = seen.clone();
        let cb: ChangeCallback<bool> = Rc::new(move |v: bool| s.borrow_mut().push(v));
        let frame = || use_controllable_state(None, false, Some(cb.clone()));

        let (open, set) = compose(frame);
        assert!(!open);
        set.update(|o| !o);
        set.set(true);
        let (open, _) = compose(frame);
        assert!(open);
        assert_eq!(*seen.borrow(), vec![true]);
    }

    #[test]
    fn test_controlled_only_reports() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = seen.clone();
        let cb: ChangeCallback<bool> = Rc::new(move |v: bool| s.borrow_mut().push(v));
        let frame = || use_controllable_state(Some(false), true, Some(cb.clone()));

        let (open, set) = compose(frame);
        assert!(!open);
        set.set(true);
        let (open, _) = compose(frame);
        assert!(!open);
        assert_eq!(*seen.borrow(), vec![true]);
    }
}
