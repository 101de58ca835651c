#![allow(clippy::multiple_crate_versions)]

//! In-memory backend for Waypoint.
//!
//! [`HeadlessDocument`] implements the element sink over a reference-counted node tree that
//! can be inspected, serialised to HTML and sent events. Paired with
//! [`MemoryHistory`](waypoint_router::MemoryHistory) it runs a whole application without a
//! browser, which is what the test suites and the demo do.

mod dom;

pub use dom::{HeadlessDocument, NodeRef};
pub use waypoint_router::MemoryHistory;

/// Default id of the root element.
pub const DEFAULT_ROOT_ID: &str = "root";

/// A document, its root element and a session history, ready to hand to a router.
#[derive(Debug)]
pub struct HeadlessHost {
    document: HeadlessDocument,
    root: NodeRef,
    history: MemoryHistory,
}

impl HeadlessHost {
    /// Creates a host whose history starts at `location`.
    pub fn new(location: impl Into<String>) -> Self {
        Self::with_root_id(DEFAULT_ROOT_ID, location)
    }

    /// Creates a host with a custom root element id.
    pub fn with_root_id(root_id: &str, location: impl Into<String>) -> Self {
        let root = NodeRef::element("div");
        root.set_attribute("id", root_id);
        let location = location.into();
        tracing::debug!(root_id, location = %location, "headless host created");
        Self {
            document: HeadlessDocument::new(),
            root,
            history: MemoryHistory::new(location),
        }
    }

    /// A handle to the root element.
    #[must_use]
    pub fn root(&self) -> NodeRef {
        self.root.clone()
    }

    /// A handle to the shared history.
    #[must_use]
    pub fn history(&self) -> MemoryHistory {
        self.history.clone()
    }

    /// Splits the host into the parts a router takes.
    #[must_use]
    pub fn into_parts(self) -> (HeadlessDocument, NodeRef, MemoryHistory) {
        (self.document, self.root, self.history)
    }
}
