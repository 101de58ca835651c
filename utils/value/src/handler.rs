use alloc::rc::Rc;
use core::{any::type_name, fmt};

/// An event delivered by the host to a registered listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    kind: String,
}

impl Event {
    /// Creates an event of the given kind, e.g. `"click"`.
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into() }
    }

    /// Returns the lower-cased event kind.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }
}

/// A shared event callback carried as a [`Value::Function`](crate::Value::Function).
#[derive(Clone)]
pub struct EventHandler(Rc<dyn Fn(&Event)>);

impl fmt::Debug for EventHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(type_name::<Self>())
    }
}

impl EventHandler {
    /// Wraps a callback.
    pub fn new(callback: impl Fn(&Event) + 'static) -> Self {
        Self(Rc::new(callback))
    }

    /// Invokes the callback.
    pub fn call(&self, event: &Event) {
        (self.0)(event);
    }

    /// Returns `true` if both handlers share the same callback.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
