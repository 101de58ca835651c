//! Component and route registration.
//!
//! Registration happens in two phases. A [`RegistryBuilder`] collects component descriptors
//! and routes during startup, then [`RegistryBuilder::build`] freezes them into a
//! [`Registry`] that is shared, read-only, with the renderer and the router for the rest of
//! the process.

use alloc::{collections::BTreeMap, rc::Rc};

use waypoint_value::Props;

use crate::component::ComponentDescriptor;

/// Associates an exact path with a component and its static props.
#[derive(Debug, Clone)]
pub struct RouteEntry {
    path: String,
    component: String,
    props: Props,
}

impl RouteEntry {
    /// The exact path this entry matches, base prefix included.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Name of the component rendered for this path.
    #[must_use]
    pub fn component(&self) -> &str {
        &self.component
    }

    /// Static props passed to the component.
    #[must_use]
    pub const fn props(&self) -> &Props {
        &self.props
    }
}

/// Mutable startup phase of the [`Registry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    components: BTreeMap<String, Rc<ComponentDescriptor>>,
    routes: Vec<RouteEntry>,
}

impl RegistryBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a descriptor under `name`, replacing any previous one.
    pub fn define_component(
        &mut self,
        name: impl Into<String>,
        descriptor: ComponentDescriptor,
    ) -> &mut Self {
        let name = name.into();
        if self
            .components
            .insert(name.clone(), Rc::new(descriptor))
            .is_some()
        {
            tracing::debug!(component = %name, "component redefined, last definition wins");
        }
        self
    }

    /// Registers a route.
    ///
    /// Registering a path twice replaces the earlier entry in place, so the last registration
    /// for a path is the one that resolves.
    pub fn register_route(
        &mut self,
        path: impl Into<String>,
        component: impl Into<String>,
        props: Props,
    ) -> &mut Self {
        let entry = RouteEntry {
            path: path.into(),
            component: component.into(),
            props,
        };
        match self.routes.iter_mut().find(|route| route.path == entry.path) {
            Some(existing) => {
                tracing::debug!(path = %entry.path, "route re-registered, last registration wins");
                *existing = entry;
            }
            None => self.routes.push(entry),
        }
        self
    }

    /// Freezes the registrations.
    #[must_use]
    pub fn build(self) -> Registry {
        tracing::debug!(
            components = self.components.len(),
            routes = self.routes.len(),
            "registry sealed"
        );
        Registry {
            components: self.components,
            routes: self.routes,
        }
    }
}

/// Read-only application context: component descriptors by name and routes by path.
#[derive(Debug, Default)]
pub struct Registry {
    components: BTreeMap<String, Rc<ComponentDescriptor>>,
    routes: Vec<RouteEntry>,
}

impl Registry {
    /// Starts a new registration phase.
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Looks up a component descriptor.
    #[must_use]
    pub fn component(&self, name: &str) -> Option<&Rc<ComponentDescriptor>> {
        self.components.get(name)
    }

    /// Returns the first route whose path equals `path` exactly.
    #[must_use]
    pub fn route(&self, path: &str) -> Option<&RouteEntry> {
        self.routes.iter().find(|route| route.path == path)
    }

    /// All routes in registration order.
    #[must_use]
    pub fn routes(&self) -> &[RouteEntry] {
        &self.routes
    }

    /// Registered component names in order.
    pub fn component_names(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(String::as_str)
    }
}
