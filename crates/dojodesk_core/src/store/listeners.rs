//! Subscription registry shared by the stores.

use std::collections::BTreeMap;

/// Handle returned by `subscribe`, used to unsubscribe later.
pub type SubscriptionId = u64;

/// Change callback. `Send + Sync` so stores can sit behind a process-wide lock.
pub type Listener<E> = Box<dyn Fn(&E) + Send + Sync>;

/// Ordered set of listeners for one event type.
pub struct Listeners<E> {
    next_id: SubscriptionId,
    entries: BTreeMap<SubscriptionId, Listener<E>>,
}

impl<E> Default for Listeners<E> {
    fn default() -> Self {
        Self {
            next_id: 1,
            entries: BTreeMap::new(),
        }
    }
}

impl<E> Listeners<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener; ids are never reused within one registry.
    pub fn subscribe(&mut self, listener: impl Fn(&E) + Send + Sync + 'static) -> SubscriptionId {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.insert(id, Box::new(listener));
        id
    }

    /// Removes a listener. Returns `false` for unknown or already removed ids.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.entries.remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Calls every listener in subscription order.
    pub fn notify(&self, event: &E) {
        for listener in self.entries.values() {
            listener(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Listeners;
    use std::sync::{Arc, Mutex};

    #[test]
    fn notify_reaches_listeners_in_subscription_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut listeners = Listeners::<u32>::new();

        let first = Arc::clone(&seen);
        listeners.subscribe(move |value| first.lock().unwrap().push(("first", *value)));
        let second = Arc::clone(&seen);
        listeners.subscribe(move |value| second.lock().unwrap().push(("second", *value)));

        listeners.notify(&7);
        assert_eq!(*seen.lock().unwrap(), vec![("first", 7), ("second", 7)]);
    }

    #[test]
    fn unsubscribe_stops_delivery_and_ids_are_not_reused() {
        let count = Arc::new(Mutex::new(0));
        let mut listeners = Listeners::<()>::new();

        let counter = Arc::clone(&count);
        let id = listeners.subscribe(move |_| *counter.lock().unwrap() += 1);
        assert!(listeners.unsubscribe(id));
        assert!(!listeners.unsubscribe(id));
        assert!(listeners.is_empty());

        listeners.notify(&());
        assert_eq!(*count.lock().unwrap(), 0);

        let next = listeners.subscribe(|_| {});
        assert_ne!(next, id);
        assert_eq!(listeners.len(), 1);
    }
}
