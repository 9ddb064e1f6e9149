//! Scoped action subscriptions.
//!
//! A host component subscribes when it mounts and keeps the returned
//! [`Subscription`]; dropping it (when the component unmounts) removes the
//! listener. Everything runs on one thread, so the registry is an
//! `Rc<RefCell<_>>`.

#[cfg(test)]
#[path = "bus_test.rs"]
mod bus_test;

use std::cell::RefCell;
use std::rc::Rc;

use crate::viewport::Action;

/// A listener for viewport actions.
pub type Listener = Rc<dyn Fn(&Action)>;

/// Fan-out of actions to every live subscriber.
#[derive(Clone, Default)]
pub struct ActionBus {
    listeners: Rc<RefCell<Vec<Listener>>>,
}

impl ActionBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` until the returned guard is dropped.
    #[must_use = "dropping the subscription unregisters the listener immediately"]
    pub fn subscribe(&self, listener: Listener) -> Subscription {
        self.listeners.borrow_mut().push(Rc::clone(&listener));
        Subscription { listener, listeners: Rc::clone(&self.listeners) }
    }

    /// Deliver `action` to every listener registered at the time of the call.
    pub fn emit(&self, action: &Action) {
        let snapshot = self.listeners.borrow().clone();
        for listener in snapshot {
            listener(action);
        }
    }

    /// Deliver each action in order.
    pub fn emit_all(&self, actions: &[Action]) {
        for action in actions {
            self.emit(action);
        }
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl std::fmt::Debug for ActionBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionBus").field("listeners", &self.listener_count()).finish()
    }
}

/// Keeps a listener registered for as long as it lives.
pub struct Subscription {
    listener: Listener,
    listeners: Rc<RefCell<Vec<Listener>>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let mut listeners = self.listeners.borrow_mut();
        listeners.retain(|item| !Rc::ptr_eq(item, &self.listener));
    }
}
