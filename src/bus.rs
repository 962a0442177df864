//! Event bus: Synchronous publish/subscribe for lifecycle notifications.
//!
//! Stateful components own an [`EventBus`] and forward `on`/`off` to it
//! rather than sharing a base type. Handlers run on the emitting call,
//! in registration order, and are filtered by event kind.
//!
//! # Example
//!
//! ```
//! use scenebox::bus::{Event, EventBus};
//!
//! #[derive(Debug)]
//! enum Ping { Hello(u32) }
//!
//! impl Event for Ping {
//!     type Kind = ();
//!     fn kind(&self) {}
//! }
//!
//! let mut bus = EventBus::new();
//! let sub = bus.on((), |event: &Ping| println!("{event:?}"));
//! bus.emit(&Ping::Hello(1));
//! assert!(bus.off(sub));
//! ```

/// An event that can be routed by kind.
pub trait Event {
    /// Discriminant handlers subscribe to.
    type Kind: Copy + PartialEq;

    /// The kind of this event.
    fn kind(&self) -> Self::Kind;
}

/// Handle returned by [`EventBus::on`], used to unsubscribe.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Subscription(u64);

/// Boxed event handler.
type HandlerFn<E> = Box<dyn FnMut(&E)>;

/// A registered handler.
struct Handler<E: Event> {
    id: Subscription,
    kind: E::Kind,
    callback: HandlerFn<E>,
}

/// Named-event publish/subscribe.
pub struct EventBus<E: Event> {
    /// Handlers in registration order.
    handlers: Vec<Handler<E>>,
    /// Next subscription id to hand out.
    next_id: u64,
}

impl<E: Event> EventBus<E> {
    /// Create an empty bus.
    pub const fn new() -> Self {
        Self {
            handlers: Vec::new(),
            next_id: 0,
        }
    }

    /// Register `handler` for events of `kind`.
    pub fn on<F>(&mut self, kind: E::Kind, handler: F) -> Subscription
    where
        F: FnMut(&E) + 'static,
    {
        let id = Subscription(self.next_id);
        self.next_id += 1;
        self.handlers.push(Handler {
            id,
            kind,
            callback: Box::new(handler),
        });
        id
    }

    /// Remove a handler. Returns `false` if it was already gone.
    pub fn off(&mut self, subscription: Subscription) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|h| h.id != subscription);
        self.handlers.len() != before
    }

    /// Deliver `event` to every handler registered for its kind.
    pub fn emit(&mut self, event: &E) {
        let kind = event.kind();
        for handler in self.handlers.iter_mut().filter(|h| h.kind == kind) {
            (handler.callback)(event);
        }
    }

    /// Number of registered handlers.
    #[inline]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if no handler is registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<E: Event> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Event> std::fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
