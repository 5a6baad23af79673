//! Change-notification registry for frontends observing the game

use rustc_hash::FxHashMap;
use std::fmt;

/// Handle identifying a registered observer; needed to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// The set of registered observers.
///
/// Observers are invoked synchronously, in no particular order, after each
/// state-changing call. Notifications carry no payload: a woken observer
/// re-reads whatever game state it cares about.
#[derive(Default)]
pub struct ObserverRegistry {
    next_id: u64,
    observers: FxHashMap<u64, Box<dyn FnMut()>>,
}

impl ObserverRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `observer`; returns the handle needed to unsubscribe.
    pub fn subscribe(&mut self, observer: Box<dyn FnMut()>) -> ObserverId {
        let id = self.next_id;
        self.next_id += 1;
        self.observers.insert(id, observer);
        ObserverId(id)
    }

    /// Remove a previously registered observer. Returns whether the handle
    /// was still registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.remove(&id.0).is_some()
    }

    /// Number of registered observers.
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// True if no observer is registered.
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Invoke every registered observer once.
    pub(crate) fn notify_all(&mut self) {
        for observer in self.observers.values_mut() {
            observer();
        }
    }
}

impl fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_notify_reaches_every_observer() {
        let mut registry = ObserverRegistry::new();
        let first = Rc::new(Cell::new(0u32));
        let second = Rc::new(Cell::new(0u32));

        let handle = Rc::clone(&first);
        registry.subscribe(Box::new(move || handle.set(handle.get() + 1)));
        let handle = Rc::clone(&second);
        registry.subscribe(Box::new(move || handle.set(handle.get() + 1)));

        registry.notify_all();
        registry.notify_all();
        assert_eq!(first.get(), 2);
        assert_eq!(second.get(), 2);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let mut registry = ObserverRegistry::new();
        let count = Rc::new(Cell::new(0u32));

        let handle = Rc::clone(&count);
        let id = registry.subscribe(Box::new(move || handle.set(handle.get() + 1)));
        registry.notify_all();

        assert!(registry.unsubscribe(id));
        assert!(!registry.unsubscribe(id));
        registry.notify_all();
        assert_eq!(count.get(), 1);
        assert!(registry.is_empty());
    }
}
