#![doc = include_str!("../README.md")]
#![allow(clippy::multiple_crate_versions)]

extern crate alloc;

pub mod app;
pub mod config;
pub mod logging;

#[doc(inline)]
pub use app::{App, AppBuilder, Navigator};
#[doc(inline)]
pub use config::{AppConfig, RouteConfig};

pub use waypoint_core as engine;
pub use waypoint_router as routing;
pub use waypoint_value as value;

#[doc(inline)]
pub use waypoint_core::{
    Component, ComponentDescriptor, Element, ElementSink, Event, EventHandler, Props, Registry,
    RenderError, SinkError, TypeTag, Value, VisualNode, child, h, props,
};
#[doc(inline)]
pub use waypoint_router::{BasePath, History, MemoryHistory, NOT_FOUND, Router, init_app};
#[doc(inline)]
pub use waypoint_value::{interpolate, is_type, lookup};

pub mod prelude {
    //! A collection of commonly used types for easy importing.
    //!
    //! ```rust
    //! use waypoint::prelude::*;
    //!
    //! fn greeting(props: &Props) -> VisualNode {
    //!     Element::new("h1").child(interpolate("Hello, {{name}}!", props)).into()
    //! }
    //!
    //! let mut app = AppBuilder::new();
    //! app.define_component("Greeting", ComponentDescriptor::new(greeting));
    //! ```
    pub use super::{
        App, AppBuilder, AppConfig, BasePath, Component, ComponentDescriptor, Element,
        ElementSink, Event, History, Navigator, NOT_FOUND, Props, RenderError, TypeTag, Value,
        VisualNode, child, h, interpolate, is_type, lookup, props,
    };
}
