//! Routing for the Waypoint framework.
//!
//! The [`Router`] maps the current location to a registered component and renders it into a
//! root node. Every navigation is a full teardown followed by a fresh render: the visible tree
//! is purely a function of the current path and the [`Registry`].
//!
//! Paths match by exact string equality, base prefix included. Unmatched paths render the
//! component registered as [`NOT_FOUND`], which applications must define.

extern crate alloc;

pub mod history;

use alloc::rc::Rc;
use core::{cell::RefCell, fmt};

pub use history::{BasePath, History, Listener, MemoryHistory};
use waypoint_core::{ElementSink, Mounted, Props, Registry, RenderError, Renderer, RouteEntry};

/// Name of the fallback component rendered for unmatched paths.
pub const NOT_FOUND: &str = "NotFound";

/// Outcome of matching a path against the registered routes.
#[derive(Debug, Clone, Copy)]
pub enum Resolution<'a> {
    /// A route matched exactly.
    Route(&'a RouteEntry),
    /// No route matched; [`NOT_FOUND`] renders with empty props.
    NotFound,
}

impl Resolution<'_> {
    /// Name of the component this resolution renders.
    #[must_use]
    pub fn component(&self) -> &str {
        match self {
            Self::Route(route) => route.component(),
            Self::NotFound => NOT_FOUND,
        }
    }
}

/// Drives rendering from navigation events.
pub struct Router<S: ElementSink, H> {
    renderer: Renderer,
    sink: S,
    root: S::Node,
    history: H,
    base: BasePath,
    current: Option<Mounted<S::Node>>,
}

impl<S, H> fmt::Debug for Router<S, H>
where
    S: ElementSink + fmt::Debug,
    S::Node: fmt::Debug,
    H: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("sink", &self.sink)
            .field("root", &self.root)
            .field("history", &self.history)
            .field("base", &self.base)
            .finish_non_exhaustive()
    }
}

impl<S: ElementSink, H: History> Router<S, H> {
    /// Creates a router rendering into `root` through `sink`.
    pub fn new(registry: Rc<Registry>, sink: S, root: S::Node, history: H, base: BasePath) -> Self {
        Self {
            renderer: Renderer::new(registry),
            sink,
            root,
            history,
            base,
            current: None,
        }
    }

    /// Matches `path` against the registered routes, first match wins.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Resolution<'_> {
        self.renderer
            .registry()
            .route(path)
            .map_or(Resolution::NotFound, Resolution::Route)
    }

    /// Clears the root and renders whatever the current location resolves to.
    ///
    /// # Errors
    ///
    /// Propagates every render error. The root has already been cleared at that point, so a
    /// failed render leaves it empty.
    pub fn resolve_and_render(&mut self) -> Result<(), RenderError> {
        let path = self.history.location();
        self.render_path(&path)
    }

    /// Records `base + path` as the current location and renders it.
    ///
    /// # Errors
    ///
    /// Returns an error if the history rejects the update or rendering fails.
    pub fn navigate_to(&mut self, path: &str) -> Result<(), RenderError> {
        let full = self.base.join(path);
        tracing::info!(path = %full, "navigating");
        self.history.push(&full)?;
        self.resolve_and_render()
    }

    fn render_path(&mut self, path: &str) -> Result<(), RenderError> {
        self.current = None;
        self.sink.clear(&self.root)?;

        let registry = self.renderer.registry();
        let mounted = if let Some(route) = registry.route(path) {
            tracing::debug!(path, component = route.component(), "route matched");
            self.renderer
                .render(&mut self.sink, route.component(), route.props(), &self.root)?
        } else {
            tracing::warn!(path, "no route matched, rendering {NOT_FOUND}");
            self.renderer
                .render(&mut self.sink, NOT_FOUND, &Props::new(), &self.root)?
        };
        self.current = Some(mounted);
        Ok(())
    }

    /// The tree rendered by the last successful navigation.
    #[must_use]
    pub const fn current(&self) -> Option<&Mounted<S::Node>> {
        self.current.as_ref()
    }

    /// The base prefix navigation targets are joined onto.
    #[must_use]
    pub const fn base(&self) -> &BasePath {
        &self.base
    }

    /// The root node the router renders into.
    #[must_use]
    pub const fn root(&self) -> &S::Node {
        &self.root
    }

    /// The element sink.
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// The session history.
    #[must_use]
    pub const fn history(&self) -> &H {
        &self.history
    }

    /// Mutable access to the session history.
    #[must_use]
    pub const fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }

    /// The registry the router resolves against.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        self.renderer.registry()
    }
}

/// Performs the initial render, then re-renders on every host location change.
///
/// The history keeps only a weak handle to the router, so dropping the last strong handle
/// silences the listener. A location change reported while the router is already rendering
/// (a render function or handler traversing history) is logged and not rendered; the
/// render in progress finishes with its own path.
///
/// # Errors
///
/// Returns the initial render error; in that case no listener is registered.
pub fn init_app<S, H>(router: &Rc<RefCell<Router<S, H>>>) -> Result<(), RenderError>
where
    S: ElementSink + 'static,
    H: History + 'static,
{
    router.borrow_mut().resolve_and_render()?;

    let weak = Rc::downgrade(router);
    router
        .borrow_mut()
        .history_mut()
        .subscribe(Box::new(move || {
            let Some(router) = weak.upgrade() else {
                return Ok(());
            };
            let Ok(mut router) = router.try_borrow_mut() else {
                tracing::warn!("history changed while rendering, render skipped");
                return Ok(());
            };
            router.resolve_and_render()
        }));
    Ok(())
}
