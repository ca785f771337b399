//! Keyboard event hub with RAII subscriptions.
//!
//! A mounted carousel holds a [`KeyboardSubscription`]; dropping it is the
//! only way a listener leaves the hub, so every exit path (unmount,
//! replacement, failed mount) releases it.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use crate::input::NavKey;

type Listener = Rc<RefCell<dyn FnMut(NavKey)>>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: BTreeMap<u64, Listener>,
}

/// Fan-out point for window-level key events. Cloning shares the hub.
#[derive(Clone, Default)]
pub struct KeyboardHub {
    registry: Rc<RefCell<Registry>>,
}

impl std::fmt::Debug for KeyboardHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyboardHub")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl KeyboardHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, listener: F) -> KeyboardSubscription
    where
        F: FnMut(NavKey) + 'static,
    {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry
            .listeners
            .insert(id, Rc::new(RefCell::new(listener)));

        KeyboardSubscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Delivers a raw DOM key to every listener. Returns `false` when the
    /// key is not a navigation key.
    pub fn dispatch(&self, key: &str) -> bool {
        let Some(key) = NavKey::from_dom_key(key) else {
            return false;
        };

        // Listeners may subscribe or unsubscribe while running.
        let snapshot: Vec<Listener> =
            self.registry.borrow().listeners.values().cloned().collect();
        for listener in snapshot {
            if let Ok(mut callback) = listener.try_borrow_mut() {
                (*callback)(key);
            }
        }
        true
    }

    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }
}

/// Deregisters its listener on drop.
#[must_use = "dropping the subscription detaches the listener"]
#[derive(Debug)]
pub struct KeyboardSubscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Drop for KeyboardSubscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade()
            && let Ok(mut registry) = registry.try_borrow_mut()
        {
            registry.listeners.remove(&self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscription_receives_until_dropped() {
        let hub = KeyboardHub::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        let subscription = hub.subscribe(move |key| sink.borrow_mut().push(key));
        assert_eq!(hub.listener_count(), 1);

        assert!(hub.dispatch("ArrowRight"));
        assert!(!hub.dispatch("Escape"));
        drop(subscription);
        assert_eq!(hub.listener_count(), 0);
        hub.dispatch("ArrowLeft");

        assert_eq!(*seen.borrow(), vec![NavKey::Right]);
    }

    #[test]
    fn subscription_outliving_hub_is_harmless() {
        let hub = KeyboardHub::new();
        let subscription = hub.subscribe(|_| {});
        drop(hub);
        drop(subscription);
    }
}
