//! Application assembly.
//!
//! An [`AppBuilder`] collects component definitions and routes during startup, then seals
//! them into a [`Registry`] and hands everything to a [`Router`]. Components that need to
//! navigate (links, buttons) capture a [`Navigator`] before the router exists; it is bound
//! when the application is built.

use alloc::rc::{Rc, Weak};
use core::{
    cell::{Ref, RefCell},
    fmt,
};

use waypoint_core::{ComponentDescriptor, ElementSink, Props, RegistryBuilder, RenderError};
use waypoint_router::{BasePath, History, Router, init_app};

use crate::config::AppConfig;

type NavigateFn = Box<dyn Fn(&str) -> Result<(), RenderError>>;

/// A late-bound handle for navigating from inside components.
///
/// Clones share the same binding.
#[derive(Clone, Default)]
pub struct Navigator(Rc<RefCell<Option<NavigateFn>>>);

impl fmt::Debug for Navigator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navigator")
            .field("bound", &self.is_bound())
            .finish()
    }
}

impl Navigator {
    /// Returns `true` once the owning application has been built.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.0.borrow().is_some()
    }

    /// Navigates to `path`, relative to the application's base path.
    ///
    /// Requests made before the application is built, after it is dropped, or while it is
    /// already rendering are logged and ignored.
    ///
    /// # Errors
    ///
    /// Propagates the router's render error.
    pub fn navigate_to(&self, path: &str) -> Result<(), RenderError> {
        let slot = self.0.borrow();
        let Some(navigate) = slot.as_ref() else {
            tracing::warn!(path, "navigator used before the application was built");
            return Ok(());
        };
        navigate(path)
    }

    fn bind<S, H>(&self, router: Weak<RefCell<Router<S, H>>>)
    where
        S: ElementSink + 'static,
        H: History + 'static,
    {
        *self.0.borrow_mut() = Some(Box::new(move |path| {
            let Some(router) = router.upgrade() else {
                tracing::warn!(path, "navigation requested after the application was dropped");
                return Ok(());
            };
            let Ok(mut router) = router.try_borrow_mut() else {
                tracing::warn!(path, "navigation requested while rendering, ignored");
                return Ok(());
            };
            router.navigate_to(path)
        }));
    }
}

/// Collects components and routes before the application starts.
#[derive(Debug)]
pub struct AppBuilder {
    config: AppConfig,
    registry: RegistryBuilder,
    navigator: Navigator,
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AppBuilder {
    /// Creates a builder with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(AppConfig::default())
    }

    /// Creates a builder from `config`, registering its routes.
    ///
    /// Routes registered later in code replace configured routes with the same path.
    #[must_use]
    pub fn from_config(config: AppConfig) -> Self {
        let mut registry = RegistryBuilder::new();
        for route in &config.routes {
            registry.register_route(&route.path, &route.component, route.props.clone());
        }
        Self {
            config,
            registry,
            navigator: Navigator::default(),
        }
    }

    /// Defines a component, replacing any previous definition under `name`.
    pub fn define_component(
        &mut self,
        name: impl Into<String>,
        descriptor: ComponentDescriptor,
    ) -> &mut Self {
        self.registry.define_component(name, descriptor);
        self
    }

    /// Registers `component` under the full `path`.
    pub fn register_route(
        &mut self,
        path: impl Into<String>,
        component: impl Into<String>,
        props: Props,
    ) -> &mut Self {
        self.registry.register_route(path, component, props);
        self
    }

    /// The configuration this builder was created from.
    #[must_use]
    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The base path navigation targets are joined onto.
    #[must_use]
    pub fn base_path(&self) -> BasePath {
        BasePath::new(self.config.base_path.clone())
    }

    /// A navigator that becomes usable once [`build`](Self::build) runs.
    #[must_use]
    pub fn navigator(&self) -> Navigator {
        self.navigator.clone()
    }

    /// Seals the registry and wires it to a host.
    ///
    /// Nothing is rendered until [`App::init`] is called.
    pub fn build<S, H>(self, sink: S, root: S::Node, history: H) -> App<S, H>
    where
        S: ElementSink + 'static,
        H: History + 'static,
    {
        let base = self.base_path();
        let registry = Rc::new(self.registry.build());
        tracing::info!(base = base.as_str(), routes = registry.routes().len(), "application built");

        let router = Rc::new(RefCell::new(Router::new(registry, sink, root, history, base)));
        self.navigator.bind(Rc::downgrade(&router));
        App {
            router,
            navigator: self.navigator,
        }
    }
}

/// A built application.
pub struct App<S: ElementSink, H> {
    router: Rc<RefCell<Router<S, H>>>,
    navigator: Navigator,
}

impl<S: ElementSink, H> fmt::Debug for App<S, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("navigator", &self.navigator)
            .finish_non_exhaustive()
    }
}

impl<S, H> App<S, H>
where
    S: ElementSink + 'static,
    H: History + 'static,
{
    /// Renders the current location and starts following host navigation.
    ///
    /// # Errors
    ///
    /// Returns the initial render error.
    pub fn init(&self) -> Result<(), RenderError> {
        init_app(&self.router)
    }

    /// Navigates to `path`, relative to the base path.
    ///
    /// # Errors
    ///
    /// Returns an error if the history update or the render fails.
    pub fn navigate_to(&self, path: &str) -> Result<(), RenderError> {
        self.router.borrow_mut().navigate_to(path)
    }

    /// Borrows the router.
    ///
    /// # Panics
    ///
    /// Panics if the router is currently rendering.
    #[must_use]
    pub fn router(&self) -> Ref<'_, Router<S, H>> {
        self.router.borrow()
    }

    /// A shared handle to the router.
    #[must_use]
    pub fn handle(&self) -> Rc<RefCell<Router<S, H>>> {
        self.router.clone()
    }

    /// The navigator bound to this application.
    #[must_use]
    pub fn navigator(&self) -> Navigator {
        self.navigator.clone()
    }
}
