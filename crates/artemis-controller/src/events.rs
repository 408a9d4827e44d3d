//! Minimal observer registry.
//!
//! Used for collision listeners on a [`PhysicsBody`](crate::PhysicsBody) and for
//! lock/unlock notifications on the controller. Listeners are `Send + Sync` so
//! the owning value can live inside an ECS resource.

/// Handle returned by [`Dispatcher::subscribe`], used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Boxed listener callback.
pub type Listener<E> = Box<dyn FnMut(&E) + Send + Sync>;

/// Ordered list of listeners for events of type `E`.
pub struct Dispatcher<E> {
    listeners: Vec<(ListenerId, Listener<E>)>,
    next_id: u64,
}

impl<E> Default for Dispatcher<E> {
    fn default() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 0,
        }
    }
}

impl<E> std::fmt::Debug for Dispatcher<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<E> Dispatcher<E> {
    /// Create an empty dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. Listeners run in registration order.
    pub fn subscribe(&mut self, listener: Listener<E>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// Invoke every listener with `event`.
    pub fn emit(&mut self, event: &E) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Whether no listeners are registered.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicU32, Ordering},
    };

    use super::*;

    #[test]
    fn test_emit_reaches_all_listeners() {
        let hits = Arc::new(AtomicU32::new(0));
        let mut dispatcher = Dispatcher::<u32>::new();
        for _ in 0..2 {
            let hits = hits.clone();
            dispatcher.subscribe(Box::new(move |value| {
                hits.fetch_add(*value, Ordering::Relaxed);
            }));
        }
        dispatcher.emit(&3);
        assert_eq!(hits.load(Ordering::Relaxed), 6);
    }

    #[test]
    fn test_unsubscribe_twice() {
        let mut dispatcher = Dispatcher::<()>::new();
        let id = dispatcher.subscribe(Box::new(|_| {}));
        assert!(dispatcher.unsubscribe(id));
        assert!(!dispatcher.unsubscribe(id));
        assert!(dispatcher.is_empty());
    }
}
