//! The host navigation capability.

use alloc::rc::Rc;
use core::{cell::RefCell, fmt};

use waypoint_core::{RenderError, SinkError};

/// Callback invoked when the host reports a location change (back/forward).
pub type Listener = Box<dyn FnMut() -> Result<(), RenderError>>;

/// Host session history.
///
/// `push` records a new location without notifying listeners, mirroring `pushState`.
/// Listeners are only notified by host-initiated traversal such as back and forward.
pub trait History {
    /// Returns the current location path.
    fn location(&self) -> String;

    /// Records `path` as the current location.
    ///
    /// # Errors
    ///
    /// Returns an error if the host refuses the history update.
    fn push(&mut self, path: &str) -> Result<(), SinkError>;

    /// Registers a listener for the rest of the process lifetime.
    fn subscribe(&mut self, listener: Listener);
}

/// Joins navigation targets onto a fixed base prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasePath(String);

impl BasePath {
    /// Creates a base prefix, e.g. `/dist/index.html`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self(prefix.into())
    }

    /// Appends `path` to the prefix verbatim.
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        format!("{}{path}", self.0)
    }

    /// The prefix itself.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Default)]
struct MemoryState {
    entries: Vec<String>,
    index: usize,
    listeners: Vec<Listener>,
}

/// An in-memory session history.
///
/// Clones share the same history, so a host can keep a handle for back/forward while the
/// router owns another.
#[derive(Clone)]
pub struct MemoryHistory(Rc<RefCell<MemoryState>>);

impl fmt::Debug for MemoryHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0.borrow();
        f.debug_struct("MemoryHistory")
            .field("entries", &state.entries)
            .field("index", &state.index)
            .field("listeners", &state.listeners.len())
            .finish()
    }
}

impl MemoryHistory {
    /// Creates a history whose single entry is `initial`.
    pub fn new(initial: impl Into<String>) -> Self {
        Self(Rc::new(RefCell::new(MemoryState {
            entries: vec![initial.into()],
            index: 0,
            listeners: Vec::new(),
        })))
    }

    /// Moves one entry back and notifies listeners. Does nothing at the first entry.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by a listener.
    pub fn back(&self) -> Result<bool, RenderError> {
        self.go(-1)
    }

    /// Moves one entry forward and notifies listeners. Does nothing at the last entry.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by a listener.
    pub fn forward(&self) -> Result<bool, RenderError> {
        self.go(1)
    }

    /// Moves `delta` entries and notifies listeners if the target exists.
    ///
    /// Returns whether the location changed.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by a listener.
    pub fn go(&self, delta: isize) -> Result<bool, RenderError> {
        let mut listeners = {
            let mut state = self.0.borrow_mut();
            let Some(target) = state.index.checked_add_signed(delta) else {
                return Ok(false);
            };
            if delta == 0 || target >= state.entries.len() {
                return Ok(false);
            }
            state.index = target;
            core::mem::take(&mut state.listeners)
        };

        // Listeners run without the state borrowed, they read the location back.
        let result = listeners.iter_mut().try_for_each(|listener| listener());

        let mut state = self.0.borrow_mut();
        listeners.append(&mut state.listeners);
        state.listeners = listeners;
        result.map(|()| true)
    }

    /// All recorded entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        self.0.borrow().entries.clone()
    }
}

impl History for MemoryHistory {
    fn location(&self) -> String {
        let state = self.0.borrow();
        state.entries[state.index].clone()
    }

    fn push(&mut self, path: &str) -> Result<(), SinkError> {
        let mut state = self.0.borrow_mut();
        let next = state.index + 1;
        state.entries.truncate(next);
        state.entries.push(path.to_owned());
        state.index = next;
        Ok(())
    }

    fn subscribe(&mut self, listener: Listener) {
        self.0.borrow_mut().listeners.push(listener);
    }
}
