//! Core functionality for the Waypoint framework.
//!
//! This crate contains the component lifecycle engine:
//!
//! - [`ComponentDescriptor`]: an immutable registration record holding a render function and
//!   an optional declared prop shape.
//! - [`Registry`]: the frozen application context mapping component names to descriptors and
//!   paths to [`RouteEntry`]s. It is populated through a [`RegistryBuilder`] once at startup.
//! - [`ComponentInstance`]: holds a component's current and previous props and decides, on
//!   every [`display`](ComponentInstance::display) tick, whether to regenerate its output.
//! - [`Renderer`]: validates props, instantiates components, recurses into declared children
//!   and attaches the resulting subtree to an [`ElementSink`].
//!
//! Rendering is synchronous and always rebuilds the whole subtree; there is no diffing.

extern crate alloc;

pub mod component;
pub mod error;
pub mod instance;
pub mod node;
pub mod registry;
pub mod renderer;

#[cfg(test)]
mod testing;

#[doc(inline)]
pub use component::{Component, ComponentDescriptor};
#[doc(inline)]
pub use error::{RenderError, SinkError};
#[doc(inline)]
pub use instance::{ComponentInstance, Freshness};
#[doc(inline)]
pub use node::{
    Attribute, Element, ElementSink, HostChild, VisualNode, css_property_name, h, materialize,
};
#[doc(inline)]
pub use registry::{Registry, RegistryBuilder, RouteEntry};
#[doc(inline)]
pub use renderer::{Mounted, Renderer, child};

pub use waypoint_value::{self as value, Event, EventHandler, Props, TypeTag, Value, props};
